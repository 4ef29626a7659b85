pub mod body;
pub mod catalog;
pub mod export;
pub mod resumes;
pub mod styles;

pub use body::JsonBody;
pub use catalog::{handle_get_template, handle_list_presets, handle_list_templates, PresetQuery};
pub use catalog::{__path_handle_get_template, __path_handle_list_presets, __path_handle_list_templates};
pub use export::{handle_generate_pdf, handle_preview};
pub use export::{__path_handle_generate_pdf, __path_handle_preview};
pub use resumes::{
    handle_create_resume, handle_delete_resume, handle_get_resume, handle_list_resumes,
    handle_update_resume, ListQuery,
};
pub use resumes::{
    __path_handle_create_resume, __path_handle_delete_resume, __path_handle_get_resume,
    __path_handle_list_resumes, __path_handle_update_resume,
};
pub use styles::{handle_delete_style, handle_get_style, handle_save_style};
pub use styles::{__path_handle_delete_style, __path_handle_get_style, __path_handle_save_style};
