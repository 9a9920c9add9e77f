pub mod change;
pub mod chart;
pub mod column;
pub mod picker;
pub mod point;
pub mod settings;
pub mod stablecoin;
pub mod table;
