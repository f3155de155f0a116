/// Chart layer: scaling, geometry, and the render plan.
///
/// ```text
///   Series (per measure)
///        │
///        ▼
///   ┌─────────┐
///   │  scale   │  shared maximum, tick set, value → pixel
///   └─────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ geometry  │  area paths, gridlines, axes
///   └──────────┘
///        │
///        ▼
///   ┌──────┐
///   │ plan  │  ordered primitives → any Surface
///   └──────┘
/// ```

pub mod geometry;
pub mod plan;
pub mod scale;
