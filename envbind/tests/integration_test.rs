//! Integration tests

use envbind::{EnvBind, EnvError, Kind, VarSpec};
use serial_test::serial;
use std::collections::HashMap;
use std::env;

fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[derive(Debug, Default, EnvBind)]
struct BasicConfig {
    #[env = "BOOL_FIELD"]
    pub bool_field: bool,

    #[env = "STR_FIELD"]
    pub str_field: String,
}

#[derive(Debug, Default, EnvBind)]
struct SubConfig {
    #[env = "SUB_STR_FIELD"]
    pub sub_str_field: String,
}

#[derive(Debug, Default, EnvBind)]
struct NestedConfig {
    #[env = "BOOL_FIELD"]
    pub bool_field: bool,

    #[env = "STR_FIELD"]
    pub str_field: String,

    pub sub_config_field: SubConfig,
}

#[derive(Debug, Default, EnvBind)]
struct Embedded {
    pub sub_bool_field: bool,
}

#[derive(Debug, Default, EnvBind)]
struct EmbeddingConfig {
    pub str_field: String,
    pub int_field: isize,

    #[env(flatten)]
    pub embedded: Embedded,
}

#[derive(Debug, Default, EnvBind)]
struct CustomTaggedEmbedded {
    #[env = "SUB_BOOL_CUSTOM_FIELD"]
    pub sub_bool_field: bool,
}

#[derive(Debug, Default, EnvBind)]
struct CustomTagConfig {
    #[env = "STR_CUSTOM_FIELD"]
    pub str_field: String,
    pub int_field: isize,

    #[env(flatten)]
    pub embedded: CustomTaggedEmbedded,
}

#[derive(Debug, Default, EnvBind)]
#[allow(non_snake_case)]
struct PascalConfig {
    pub SubStrField: String,
    pub DBHost: String,
}

#[derive(Debug, Default, EnvBind)]
struct OptionalConfig {
    #[env = "NAME"]
    pub name: String,

    #[env = "NICKNAME,omitempty"]
    pub nickname: String,

    #[env = "RETRIES,omitempty"]
    pub retries: u8,
}

#[derive(Debug, EnvBind)]
struct PointerConfig {
    #[env = "STR_FIELD"]
    pub str_field: String,

    #[env = "PTR_FIELD"]
    pub ptr_field: Box<String>,
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self {
            str_field: String::new(),
            ptr_field: Box::new(String::new()),
        }
    }
}

#[derive(Debug, Default, EnvBind)]
struct OrderedConfig {
    pub first: String,
    pub second: bool,
    pub third: String,
}

#[derive(Debug, Default, EnvBind)]
struct NumericConfig {
    pub int8_field: i8,
    pub int64_field: i64,
    pub uint_field: usize,
    pub float32_field: f32,
    pub complex128_field: envbind::Complex64,
}

#[derive(Debug, Default, EnvBind)]
struct SecretConfig {
    #[env = "SECRET_KEY,file"]
    pub secret_key: String,

    pub normal_var: String,
}

#[test]
fn test_basic_config() {
    let mut config = BasicConfig::default();
    envbind::parse_with(
        &mut config,
        &vars(&[("BOOL_FIELD", "true"), ("STR_FIELD", "strFieldValue")]),
    )
    .unwrap();

    assert!(config.bool_field);
    assert_eq!(config.str_field, "strFieldValue");
}

#[test]
fn test_nested_struct() {
    let mut config = NestedConfig::default();
    envbind::parse_with(
        &mut config,
        &vars(&[
            ("BOOL_FIELD", "true"),
            ("STR_FIELD", "strFieldValue"),
            ("SUB_STR_FIELD", "subStrFieldValue"),
        ]),
    )
    .unwrap();

    assert!(config.bool_field);
    assert_eq!(config.str_field, "strFieldValue");
    assert_eq!(config.sub_config_field.sub_str_field, "subStrFieldValue");
}

#[test]
fn test_embedded_struct_default_names() {
    let mut config = EmbeddingConfig::default();
    envbind::parse_with(
        &mut config,
        &vars(&[
            ("STR_FIELD", "strVal"),
            ("INT_FIELD", "123"),
            ("SUB_BOOL_FIELD", "t"),
        ]),
    )
    .unwrap();

    assert_eq!(config.str_field, "strVal");
    assert_eq!(config.int_field, 123);
    assert!(config.embedded.sub_bool_field);
}

#[test]
fn test_embedded_struct_custom_tags() {
    let mut config = CustomTagConfig::default();
    envbind::parse_with(
        &mut config,
        &vars(&[
            ("STR_CUSTOM_FIELD", "strVal"),
            ("INT_FIELD", "123"),
            ("SUB_BOOL_CUSTOM_FIELD", "t"),
        ]),
    )
    .unwrap();

    assert_eq!(config.str_field, "strVal");
    assert_eq!(config.int_field, 123);
    assert!(config.embedded.sub_bool_field);
}

#[test]
fn test_embedded_field_error() {
    let mut config = EmbeddingConfig::default();
    let result = envbind::parse_with(
        &mut config,
        &vars(&[
            ("STR_FIELD", "strVal"),
            ("INT_FIELD", "1"),
            ("SUB_BOOL_FIELD", "text"),
        ]),
    );

    match result {
        Err(EnvError::Coercion { field, key, .. }) => {
            assert_eq!(field, "sub_bool_field");
            assert_eq!(key, "SUB_BOOL_FIELD");
        }
        other => panic!("Expected Coercion error, got {other:?}"),
    }
    assert!(!config.embedded.sub_bool_field);
}

#[test]
fn test_derived_names_from_pascal_case() {
    let mut config = PascalConfig::default();
    envbind::parse_with(
        &mut config,
        &vars(&[("SUB_STR_FIELD", "sub"), ("D_B_HOST", "db.local")]),
    )
    .unwrap();

    assert_eq!(config.SubStrField, "sub");
    assert_eq!(config.DBHost, "db.local");
}

#[test]
fn test_missing_required_field() {
    let mut config = BasicConfig::default();
    let result = envbind::parse_with(&mut config, &vars(&[("STR_FIELD", "value")]));

    match result {
        Err(EnvError::MissingRequiredVariable { key, field }) => {
            assert_eq!(key, "BOOL_FIELD");
            assert_eq!(field, "bool_field");
        }
        other => panic!("Expected MissingRequiredVariable, got {other:?}"),
    }
}

#[test]
fn test_omitempty_string_left_empty() {
    let mut config = OptionalConfig::default();
    let result = envbind::parse_with(
        &mut config,
        &vars(&[("NAME", "envbind"), ("RETRIES", "3")]),
    );

    assert!(result.is_ok());
    assert_eq!(config.name, "envbind");
    assert_eq!(config.nickname, "");
    assert_eq!(config.retries, 3);
}

#[test]
fn test_omitempty_numeric_absent_fails_coercion() {
    let mut config = OptionalConfig::default();
    let result = envbind::parse_with(
        &mut config,
        &vars(&[("NAME", "envbind"), ("NICKNAME", "eb")]),
    );

    match result {
        Err(EnvError::Coercion { key, source, .. }) => {
            assert_eq!(key, "RETRIES");
            assert!(matches!(
                source,
                envbind::CoerceError::Parse {
                    kind: Kind::Uint8,
                    ..
                }
            ));
        }
        other => panic!("Expected Coercion error, got {other:?}"),
    }
    assert_eq!(config.nickname, "eb");
    assert_eq!(config.retries, 0);
}

#[test]
fn test_unsupported_pointer_field() {
    let mut config = PointerConfig::default();
    let result = envbind::parse_with(
        &mut config,
        &vars(&[("STR_FIELD", "value"), ("PTR_FIELD", "pointee")]),
    );

    match result {
        Err(EnvError::UnsupportedKind { field, kind }) => {
            assert_eq!(field, "ptr_field");
            assert_eq!(kind, Kind::Pointer);
        }
        other => panic!("Expected UnsupportedKind, got {other:?}"),
    }
    assert_eq!(config.str_field, "value");
    assert_eq!(*config.ptr_field, "");
}

#[test]
fn test_unset_pointer_field_reports_missing_variable() {
    let mut config = PointerConfig::default();
    let result = envbind::parse_with(&mut config, &vars(&[("STR_FIELD", "value")]));

    match result {
        Err(EnvError::MissingRequiredVariable { key, field }) => {
            assert_eq!(key, "PTR_FIELD");
            assert_eq!(field, "ptr_field");
        }
        other => panic!("Expected MissingRequiredVariable, got {other:?}"),
    }
    assert_eq!(config.str_field, "value");
}

#[test]
fn test_fail_fast_keeps_earlier_fields() {
    let mut config = OrderedConfig::default();
    let result = envbind::parse_with(
        &mut config,
        &vars(&[("FIRST", "one"), ("SECOND", "maybe"), ("THIRD", "three")]),
    );

    assert!(matches!(result, Err(EnvError::Coercion { .. })));
    assert_eq!(config.first, "one");
    assert!(!config.second);
    assert_eq!(config.third, "");
}

#[test]
fn test_numeric_kinds() {
    let mut config = NumericConfig::default();
    envbind::parse_with(
        &mut config,
        &vars(&[
            ("INT8_FIELD", "-12"),
            ("INT64_FIELD", "9223372036854775807"),
            ("UINT_FIELD", "42"),
            ("FLOAT32_FIELD", "184.5"),
            ("COMPLEX128_FIELD", "1.5-2i"),
        ]),
    )
    .unwrap();

    assert_eq!(config.int8_field, -12);
    assert_eq!(config.int64_field, i64::MAX);
    assert_eq!(config.uint_field, 42);
    assert_eq!(config.float32_field, 184.5);
    assert_eq!(config.complex128_field, envbind::Complex64::new(1.5, -2.0));
}

#[test]
fn test_integer_overflow_leaves_zero() {
    let mut config = NumericConfig::default();
    let result = envbind::parse_with(
        &mut config,
        &vars(&[("INT8_FIELD", "123123123123123123123123123123")]),
    );

    assert!(matches!(result, Err(EnvError::Coercion { .. })));
    assert_eq!(config.int8_field, 0);
}

#[test]
fn test_non_struct_rejected() {
    let mut value = 0u32;
    let result = envbind::parse_with(&mut value, &vars(&[]));
    assert!(matches!(result, Err(EnvError::NotAStruct { kind: Kind::Uint32 })));
}

#[test]
fn test_describe_lists_promoted_fields() {
    let mut config = EmbeddingConfig::default();
    let keys: Vec<String> = envbind::describe(&mut config)
        .unwrap()
        .into_iter()
        .map(|spec| spec.key)
        .collect();

    assert_eq!(keys, vec!["STR_FIELD", "INT_FIELD", "SUB_BOOL_FIELD"]);
}

#[test]
fn test_describe_manifest_json() {
    let mut config = OptionalConfig::default();
    let specs = envbind::describe(&mut config).unwrap();

    assert_eq!(
        specs[2],
        VarSpec {
            field: "retries".to_string(),
            key: "RETRIES".to_string(),
            kind: Kind::Uint8,
            required: false,
            file: false,
        }
    );

    let json = serde_json::to_value(&specs).unwrap();
    assert_eq!(json[0]["key"], "NAME");
    assert_eq!(json[0]["kind"], "string");
    assert_eq!(json[0]["required"], true);
}

#[test]
fn test_describe_rejects_unsupported() {
    let mut config = PointerConfig::default();
    let result = envbind::describe(&mut config);
    assert!(matches!(result, Err(EnvError::UnsupportedKind { .. })));
}

#[test]
#[serial]
fn test_parse_process_env() {
    env::set_var("BOOL_FIELD", "true");
    env::set_var("STR_FIELD", "strFieldValue");

    let mut config = BasicConfig::default();
    envbind::parse(&mut config).unwrap();
    assert!(config.bool_field);
    assert_eq!(config.str_field, "strFieldValue");

    env::remove_var("BOOL_FIELD");
    env::remove_var("STR_FIELD");
}

#[test]
#[serial]
fn test_from_env() {
    env::set_var("BOOL_FIELD", "false");
    env::set_var("STR_FIELD", "from env");

    let config: BasicConfig = envbind::from_env().unwrap();
    assert!(!config.bool_field);
    assert_eq!(config.str_field, "from env");

    env::remove_var("BOOL_FIELD");
    env::remove_var("STR_FIELD");
}

#[test]
#[serial]
fn test_from_env_missing() {
    env::remove_var("BOOL_FIELD");
    env::remove_var("STR_FIELD");

    let result = envbind::from_env::<BasicConfig>();
    assert!(matches!(result, Err(EnvError::MissingRequiredVariable { .. })));
}

#[test]
#[serial]
fn test_file_based_secret() {
    use std::io::Write;
    use tempfile::NamedTempFile;

    let mut temp_file = NamedTempFile::new().unwrap();
    writeln!(temp_file, "super_secret_key").unwrap();

    env::set_var("SECRET_KEY_FILE", temp_file.path());
    env::set_var("NORMAL_VAR", "normal_value");
    env::remove_var("SECRET_KEY");

    let config: SecretConfig = envbind::from_env().unwrap();
    assert_eq!(config.secret_key, "super_secret_key");
    assert_eq!(config.normal_var, "normal_value");

    env::remove_var("SECRET_KEY_FILE");
    env::remove_var("NORMAL_VAR");
}

#[test]
#[serial]
fn test_direct_var_preferred_over_file() {
    use std::io::Write;
    use tempfile::NamedTempFile;

    let mut temp_file = NamedTempFile::new().unwrap();
    writeln!(temp_file, "file_value").unwrap();

    env::set_var("SECRET_KEY", "direct_value");
    env::set_var("SECRET_KEY_FILE", temp_file.path());
    env::set_var("NORMAL_VAR", "normal");

    let config: SecretConfig = envbind::from_env().unwrap();
    assert_eq!(config.secret_key, "direct_value");

    env::remove_var("SECRET_KEY");
    env::remove_var("SECRET_KEY_FILE");
    env::remove_var("NORMAL_VAR");
}

#[test]
fn test_file_not_found() {
    let mut config = SecretConfig::default();
    let result = envbind::parse_with(
        &mut config,
        &vars(&[
            ("SECRET_KEY_FILE", "/nonexistent/file/path"),
            ("NORMAL_VAR", "normal"),
        ]),
    );

    match result {
        Err(EnvError::FileRead { key, path, .. }) => {
            assert_eq!(key, "SECRET_KEY_FILE");
            assert_eq!(path, "/nonexistent/file/path");
        }
        other => panic!("Expected FileRead error, got {other:?}"),
    }
}

#[test]
fn test_file_option_ignored_without_file_variable() {
    let mut config = SecretConfig::default();
    let result = envbind::parse_with(&mut config, &vars(&[("NORMAL_VAR", "normal")]));
    assert!(matches!(
        result,
        Err(EnvError::MissingRequiredVariable { ref key, .. }) if key == "SECRET_KEY"
    ));
}
