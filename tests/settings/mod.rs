use pretty_assertions::assert_eq;

use typeset::settings::FormatSettings;
use typeset::settings::Quote;

#[test]
fn test_defaults() {
    let settings = FormatSettings::default();

    assert_eq!(80, settings.print_width);
    assert_eq!(2, settings.indent_width);
    assert_eq!(Quote::Double, settings.preferred_quote);
    assert!(settings.trailing_comma);
}

#[test]
fn test_deserializing_an_empty_object_uses_the_defaults() {
    let settings: FormatSettings = serde_json::from_str("{}").expect("valid settings");

    assert_eq!(FormatSettings::default(), settings);
}

#[test]
fn test_deserializing_overrides_individual_fields() {
    let settings: FormatSettings = serde_json::from_str(
        r#"{ "print_width": 100, "preferred_quote": "single", "trailing_comma": false }"#,
    )
    .expect("valid settings");

    assert_eq!(100, settings.print_width);
    assert_eq!(2, settings.indent_width);
    assert_eq!(Quote::Single, settings.preferred_quote);
    assert!(!settings.trailing_comma);
}

#[test]
fn test_settings_round_trip_through_serde() {
    let settings =
        FormatSettings { print_width: 120, indent_width: 4, preferred_quote: Quote::Single, trailing_comma: false };

    let json = serde_json::to_string(&settings).expect("serializable settings");
    assert_eq!(settings, serde_json::from_str::<FormatSettings>(&json).expect("valid settings"));
}

#[test]
fn test_quote_characters() {
    assert_eq!('"', Quote::Double.as_char());
    assert_eq!('\'', Quote::Single.as_char());
}
