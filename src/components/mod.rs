pub mod control_panel;
pub mod relatives;
pub mod tree_canvas;
pub mod tutorial;
