//! Schema of the master service settings every process reads first.

use std::sync::Arc;

use once_cell::sync::Lazy;

use super::types::{SettingParserInfo, SettingType};
use super::value::SettingValue;

static MASTER_SERVICE_SETTING_PARSER_INFO: Lazy<Arc<SettingParserInfo>> = Lazy::new(|| {
    SettingParserInfo::builder("master_service")
        .define_default("base_dir", SettingType::Str, SettingValue::str("/var/run/server"))
        .define_default("state_dir", SettingType::Str, SettingValue::str("/var/lib/server"))
        .define_default("instance_name", SettingType::Str, SettingValue::str("server"))
        .define_default("log_path", SettingType::Str, SettingValue::str("syslog"))
        .define_default("info_log_path", SettingType::Str, SettingValue::str(""))
        .define_default("debug_log_path", SettingType::Str, SettingValue::str(""))
        .define_default("log_timestamp", SettingType::Str, SettingValue::str("%b %d %H:%M:%S "))
        .define_default("log_debug", SettingType::StrVars, SettingValue::strvar(""))
        .define_default("log_core_filter", SettingType::StrVars, SettingValue::strvar(""))
        .define_default("process_shutdown_filter", SettingType::StrVars, SettingValue::strvar(""))
        .define_default("syslog_facility", SettingType::Str, SettingValue::str("mail"))
        .define_default(
            "import_environment",
            SettingType::Str,
            SettingValue::str("TZ CORE_OUTOFMEM CORE_ERROR LISTEN_PID LISTEN_FDS"),
        )
        .define_default("stats_writer_socket_path", SettingType::Str, SettingValue::str("stats-writer"))
        .hidden("config_cache_size", SettingType::Size, SettingValue::Size(1024 * 1024))
        .define_default("version_ignore", SettingType::Bool, SettingValue::Bool(false))
        .define_default("shutdown_clients", SettingType::Bool, SettingValue::Bool(true))
        .define_default("verbose_proctitle", SettingType::Bool, SettingValue::Bool(false))
        .define_default("haproxy_trusted_networks", SettingType::Str, SettingValue::str(""))
        .define_default("haproxy_timeout", SettingType::Time, SettingValue::Uint(3))
        .build()
});

/// The distinguished master service schema root. Compare with [`Arc::ptr_eq`].
pub fn master_service_setting_parser_info() -> &'static Arc<SettingParserInfo> {
    &MASTER_SERVICE_SETTING_PARSER_INFO
}

pub fn is_master_service(root: &Arc<SettingParserInfo>) -> bool {
    Arc::ptr_eq(root, master_service_setting_parser_info())
}
