pub mod canvas;
pub mod compositor;
pub mod rotate;
