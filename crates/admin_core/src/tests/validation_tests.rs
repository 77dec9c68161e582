use super::*;

#[derive(Debug, Clone)]
struct LoanForm {
    courier: String,
    principal_cents: i64,
    note: String,
}

fn sample_form() -> LoanForm {
    LoanForm {
        courier: String::new(),
        principal_cents: 0,
        note: "unchecked".to_string(),
    }
}

fn loan_schema() -> ValidationSchema<LoanForm> {
    ValidationSchema::new()
        .rule("courier", |form: &LoanForm| {
            form.courier
                .trim()
                .is_empty()
                .then(|| "courier is required".to_string())
        })
        .rule("principal_cents", |form: &LoanForm| {
            (form.principal_cents <= 0).then(|| "principal must be positive".to_string())
        })
}

#[test]
fn flags_only_fields_with_rules() {
    let errors = validate(&sample_form(), &loan_schema());

    assert_eq!(errors.len(), 2);
    assert_eq!(errors.get("courier").map(String::as_str), Some("courier is required"));
    assert_eq!(
        errors.get("principal_cents").map(String::as_str),
        Some("principal must be positive")
    );
    // `note` has no rule and must never appear.
    assert!(!errors.contains_key("note"));
}

#[test]
fn empty_schema_is_always_valid() {
    let errors = validate(&sample_form(), &ValidationSchema::<LoanForm>::new());
    assert!(errors.is_empty());
}

#[test]
fn passing_form_yields_empty_map() {
    let form = LoanForm {
        courier: "amina".to_string(),
        principal_cents: 50_000,
        note: String::new(),
    };
    assert!(validate(&form, &loan_schema()).is_empty());
}

#[test]
fn rule_sees_the_entire_form_value() {
    // Cross-field rule attached to one field: a note is mandatory for large
    // principals.
    let schema = ValidationSchema::new().rule("note", |form: &LoanForm| {
        (form.principal_cents > 100_000 && form.note.is_empty())
            .then(|| "a note is required for large loans".to_string())
    });

    let mut form = LoanForm {
        courier: "amina".to_string(),
        principal_cents: 200_000,
        note: String::new(),
    };
    assert_eq!(
        validate(&form, &schema).get("note").map(String::as_str),
        Some("a note is required for large loans")
    );

    form.principal_cents = 10_000;
    assert!(validate(&form, &schema).is_empty());
}

#[test]
fn validate_is_deterministic() {
    let form = sample_form();
    let schema = loan_schema();
    assert_eq!(validate(&form, &schema), validate(&form, &schema));
}
