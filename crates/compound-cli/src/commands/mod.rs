pub mod apply_ops;
pub mod config_ops;
pub mod train_ops;
