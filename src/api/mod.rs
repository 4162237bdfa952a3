pub mod image;
pub mod settings;
pub mod source;
pub mod transform;

pub use image::{handle_export, handle_preview, __path_handle_export, __path_handle_preview};
pub use settings::{
    handle_get_settings, handle_update_settings, SettingsPatch, SettingsResponse,
    __path_handle_get_settings, __path_handle_update_settings,
};
pub use source::{handle_upload_source, SourceResponse, __path_handle_upload_source};
pub use transform::{
    handle_get_transform, handle_transform_event, InputEvent, TransformResponse,
    __path_handle_get_transform, __path_handle_transform_event,
};
