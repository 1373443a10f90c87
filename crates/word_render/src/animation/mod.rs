pub mod director;
pub mod series;
