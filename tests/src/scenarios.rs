use std::error::Error;
use std::sync::Once;

use elcheck::{ExpressionValidator, Outcome, ValidateError};
use elcheck_env::{ConfigError, PredicateFilter, ValidatorConfig, VariableWhitelist};
use elcheck_type::{DefaultValueFactory, ElType, LookupError, Value};
use elcheck_typeck::{PathTypeResolver, ResolveError, ValidationError};
use log::LevelFilter;
use pretty_assertions::assert_eq;

use crate::shop_model;

static INIT: Once = Once::new();

fn init_test_logger() {
    INIT.call_once(|| {
        let _ = env_logger::Builder::new()
            .is_test(true)
            .filter_level(LevelFilter::Debug)
            .try_init();
    });
}

fn validation_error(err: ValidateError) -> ValidationError {
    match err {
        ValidateError::Resolve(ResolveError::Invalid(e)) => e,
        other => panic!("expected a validation failure, got {other:?}"),
    }
}

#[test]
fn list_element_type_comes_from_wildcard_override() {
    init_test_logger();
    let config = ValidatorConfig::builder()
        .with_override("order.items.*", ElType::bean("LineItem"))
        .unwrap()
        .build();
    let validator = ExpressionValidator::with_default_factory(config, shop_model());

    let step = validator.validate("#{order.items[0].price}").unwrap();
    assert_eq!(step.ty, ElType::Double);
    assert_eq!(step.value, Value::Double(0.0));
}

#[test]
fn list_element_without_override_is_unknown() {
    let validator =
        ExpressionValidator::with_default_factory(ValidatorConfig::builder().build(), shop_model());
    let step = validator.validate("order.items[3]").unwrap();
    assert_eq!(step.ty, ElType::Unknown);
    // Unknown placeholders accept any further property
    let deeper = validator.validate("order.items[3].anything.at.all").unwrap();
    assert_eq!(deeper.ty, ElType::Unknown);
}

#[test]
fn filter_rejects_secret_property() {
    init_test_logger();
    let config = ValidatorConfig::builder()
        .with_filter(PredicateFilter::new("no-secrets", |path| {
            !path.segments().any(|s| s.to_lowercase().contains("secret"))
        }))
        .build();
    let validator = ExpressionValidator::with_default_factory(config, shop_model());

    assert!(validator.validate("user.name").is_ok());
    match validation_error(validator.validate("user.secretToken").unwrap_err()) {
        ValidationError::RejectedByFilter { filter, path } => {
            assert_eq!(filter, "no-secrets");
            assert_eq!(path.key(), "user.secretToken");
        }
        other => panic!("expected RejectedByFilter, got {other:?}"),
    }
}

#[test]
fn nonexistent_property_is_reported_with_path() {
    let validator =
        ExpressionValidator::with_default_factory(ValidatorConfig::builder().build(), shop_model());
    match validation_error(validator.validate("order.customer.nonexistent").unwrap_err()) {
        ValidationError::PropertyNotFound {
            property,
            target,
            path,
        } => {
            assert_eq!(property, "nonexistent");
            assert_eq!(target, "User");
            assert_eq!(path.key(), "order.customer");
        }
        other => panic!("expected PropertyNotFound, got {other:?}"),
    }
}

#[test]
fn empty_array_still_yields_element_type() {
    let config = ValidatorConfig::builder().build();
    let model = shop_model();
    let factory = DefaultValueFactory::new();
    let mut resolver = PathTypeResolver::new(&config, &model, &factory);

    let order = resolver.variable_encountered("order").unwrap();
    let lines = resolver.property_encountered(&order, "lines").unwrap();
    assert_eq!(lines, Value::empty_array(ElType::bean("LineItem")));

    let line = resolver.resolve_property(&lines, "[0]").unwrap();
    assert_eq!(line.ty, ElType::bean("LineItem"));
    let sku = resolver.resolve_property(&line.value, "sku").unwrap();
    assert_eq!(sku.ty, ElType::String);
    assert_eq!(resolver.path().key(), "order.lines.0.sku");
}

#[test]
fn indeterminate_property_continues_as_unknown() {
    let validator =
        ExpressionValidator::with_default_factory(ValidatorConfig::builder().build(), shop_model());
    let step = validator.validate("order.payload.header.id").unwrap();
    assert_eq!(step.ty, ElType::Unknown);
    assert_eq!(step.value, Value::unknown("id"));
}

#[test]
fn root_variable_goes_through_filters() {
    let config = ValidatorConfig::builder()
        .with_filter(VariableWhitelist::new(["order"]))
        .build();
    let validator = ExpressionValidator::with_default_factory(config, shop_model());

    assert!(validator.validate("order.customer.name").is_ok());
    match validation_error(validator.validate("user").unwrap_err()) {
        ValidationError::RejectedByFilter { path, .. } => {
            assert_eq!(path.variable(), Some("user"));
            assert!(path.properties().is_empty());
        }
        other => panic!("expected RejectedByFilter, got {other:?}"),
    }
}

#[test]
fn generic_lookup_failure_keeps_its_cause() {
    let validator =
        ExpressionValidator::with_default_factory(ValidatorConfig::builder().build(), shop_model());
    let err = validation_error(validator.validate("legacy.flags").unwrap_err());

    assert!(matches!(
        &err,
        ValidationError::GenericEvaluation { property, path, .. }
            if property == "flags" && path.key() == "legacy"
    ));
    let cause = err
        .source()
        .and_then(|e| e.downcast_ref::<LookupError>())
        .expect("lookup error preserved as source");
    assert!(matches!(cause, LookupError::Evaluation { .. }));
    assert!(cause.to_string().contains("LegacyBean"));
}

#[test]
fn internal_failure_is_not_a_validation_failure() {
    let validator = ExpressionValidator::new(
        ValidatorConfig::builder().build(),
        shop_model(),
        DefaultValueFactory::new().with_unmockable("User"),
    );
    let err = validator.validate("order.customer.name").unwrap_err();
    assert!(!err.is_validation_failure());
    match err {
        ValidateError::Resolve(ResolveError::Internal(failure)) => {
            assert_eq!(failure.property, "customer");
            assert_eq!(failure.source.ty, ElType::bean("User"));
        }
        other => panic!("expected an internal failure, got {other:?}"),
    }
}

#[test]
fn array_of_unmockable_elements_fails_only_at_the_index() {
    let validator = ExpressionValidator::new(
        ValidatorConfig::builder().build(),
        shop_model(),
        DefaultValueFactory::new().with_unmockable("LineItem"),
    );
    assert_eq!(
        validator.validate("order.lines").unwrap().ty,
        ElType::array_of(ElType::bean("LineItem"))
    );
    match validator.validate("order.lines[0].price").unwrap_err() {
        ValidateError::Resolve(ResolveError::Internal(failure)) => {
            assert_eq!(failure.path.key(), "order.lines.0");
        }
        other => panic!("expected an internal failure, got {other:?}"),
    }
}

#[test]
fn misspelled_override_key_fails_configuration() {
    let factory = DefaultValueFactory::new();
    for key in ["order..items", "order.lines[", "x['y", "m['a.b']"] {
        let json = serde_json::json!({ "overrides": { key: "int" } }).to_string();
        let err = ValidatorConfig::builder()
            .with_json(&json, &factory)
            .unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidOverrideKey { .. }),
            "{key}: got {err:?}"
        );
    }
}

#[test]
fn json_configuration_drives_validation() {
    let factory = DefaultValueFactory::new();
    let config = ValidatorConfig::builder()
        .with_json(
            r#"{
                "overrides": { "order.items.*": "LineItem" },
                "variables": { "today": "long" },
                "blocked_segments": ["secretToken"]
            }"#,
            &factory,
        )
        .unwrap()
        .build();
    let validator = ExpressionValidator::with_default_factory(config, shop_model());

    assert_eq!(
        validator.validate("order.items[0].quantity").unwrap().ty,
        ElType::Int
    );
    assert_eq!(validator.validate("today").unwrap().ty, ElType::Long);
    assert!(validator
        .validate("user.secretToken")
        .unwrap_err()
        .is_validation_failure());
}

#[test]
fn batch_report_serializes_verdicts() {
    init_test_logger();
    let validator = ExpressionValidator::new(
        ValidatorConfig::builder().build(),
        shop_model(),
        DefaultValueFactory::new().with_unmockable("User"),
    );
    let report = validator.validate_all([
        "order.lines[0].price",
        "order.nope",
        "order.customer",
        "cookie['JSESSIONID']",
    ]);

    assert_eq!(report.valid_count(), 2);
    assert_eq!(report.invalid_count(), 1);
    assert_eq!(report.internal_count(), 1);
    assert_eq!(
        report.entries()[1].outcome,
        Outcome::Invalid {
            reason: "property 'nope' not found on Order (expression 'order')".to_string(),
            path: Some("order".to_string()),
        }
    );

    let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
    assert_eq!(json["valid"], 2);
    assert_eq!(json["expressions"][0]["type"], "double");
    assert_eq!(json["expressions"][2]["outcome"], "internal");
    assert_eq!(json["expressions"][3]["type"], "String");
}
