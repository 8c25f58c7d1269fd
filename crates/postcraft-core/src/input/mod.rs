//! Campaign input editing and validation.

pub mod editor;

pub use editor::{
    add_images, deselect_platform, problems, remove_image, select_image, select_platform,
    set_setting, validate,
};
