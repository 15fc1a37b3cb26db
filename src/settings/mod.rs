//! Configuration model: setting schemas, their current values and change masks.

mod escape;
mod master;
mod parser;
mod types;
mod value;

pub use escape::{settings_section_escape, SETTINGS_SEPARATOR};
pub use master::{is_master_service, master_service_setting_parser_info};
pub use parser::SettingParser;
pub use types::{SettingDefine, SettingParserInfo, SettingParserInfoBuilder, SettingType};
pub use value::{
    strvar_strip, strvar_unexpanded, ChangeMask, FieldChange, SettingValue, Settings,
    SETTING_STRVAR_EXPANDED, SETTING_STRVAR_UNEXPANDED,
};
