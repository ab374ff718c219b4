//! Declarative validation schema for the registration form
//!
//! Every field owns an ordered list of [`Rule`]s; the first rule that fails
//! supplies the field's message. All fields are evaluated on every pass so
//! the user sees every problem at once. The password confirmation rule runs
//! after the per-field rules, only when both passwords passed them, and
//! reports on the confirmation field.

use super::errors::FieldErrors;
use super::field::Field;
use super::registration::RegistrationForm;
use regex::Regex;
use std::sync::LazyLock;

/// Message attached to the confirmation field when the passwords differ
pub const PASSWORD_MISMATCH: &str = "Senhas não conferem";

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,4}$").expect("valid regex")
});
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\(\d{2}\) \d{5}-\d{4}$").expect("valid regex"));
static CPF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{3}\.\d{3}\.\d{3}-\d{2}$").expect("valid regex"));
static ZIPCODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{5}-\d{3}$").expect("valid regex"));

/// Text formats checked by [`Rule::Matches`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    Email,
    /// `(DD) DDDDD-DDDD`
    Phone,
    /// `DDD.DDD.DDD-DD`
    Cpf,
    /// `DDDDD-DDD`
    Zipcode,
}

impl Pattern {
    fn regex(&self) -> &'static Regex {
        match self {
            Self::Email => LazyLock::force(&EMAIL_RE),
            Self::Phone => LazyLock::force(&PHONE_RE),
            Self::Cpf => LazyLock::force(&CPF_RE),
            Self::Zipcode => LazyLock::force(&ZIPCODE_RE),
        }
    }

    pub fn is_match(&self, value: &str) -> bool {
        self.regex().is_match(value)
    }
}

/// A single constraint on one field, with the message shown when it fails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Non-empty after trimming whitespace
    Required(&'static str),
    /// At most this many characters
    MaxLength(usize, &'static str),
    /// At least this many characters
    MinLength(usize, &'static str),
    Matches(Pattern, &'static str),
    /// Boolean field must be `true`
    MustAccept(&'static str),
}

impl Rule {
    /// Returns the rule's message if `field` violates it
    pub fn check(&self, form: &RegistrationForm, field: Field) -> Option<&'static str> {
        let text = form.text(field);
        let violated = match self {
            Rule::Required(_) => text.trim().is_empty(),
            Rule::MaxLength(max, _) => text.chars().count() > *max,
            Rule::MinLength(min, _) => text.chars().count() < *min,
            Rule::Matches(pattern, _) => !pattern.is_match(text),
            Rule::MustAccept(_) => !form.terms_accepted,
        };
        violated.then_some(self.message())
    }

    pub fn message(&self) -> &'static str {
        match self {
            Rule::Required(msg)
            | Rule::MaxLength(_, msg)
            | Rule::MinLength(_, msg)
            | Rule::Matches(_, msg)
            | Rule::MustAccept(msg) => *msg,
        }
    }
}

/// Ordered rules for one field
#[derive(Debug)]
pub struct FieldRules {
    pub field: Field,
    pub rules: &'static [Rule],
}

/// Rules for every registration field, in display order
pub static REGISTRATION_SCHEMA: &[FieldRules] = &[
    FieldRules {
        field: Field::Name,
        rules: &[
            Rule::Required("Nome é obrigatório"),
            Rule::MaxLength(255, "Nome deve ter no máximo 255 caracteres"),
        ],
    },
    FieldRules {
        field: Field::Email,
        rules: &[
            Rule::Required("E-mail é obrigatório"),
            Rule::Matches(Pattern::Email, "E-mail inválido"),
        ],
    },
    FieldRules {
        field: Field::Password,
        rules: &[
            Rule::Required("Senha é obrigatória"),
            Rule::MinLength(8, "Senha deve ter no mínimo 8 caracteres"),
        ],
    },
    FieldRules {
        field: Field::PasswordConfirmation,
        rules: &[
            Rule::Required("Confirmação de senha é obrigatória"),
            Rule::MinLength(8, "Confirmação de senha deve ter no mínimo 8 caracteres"),
        ],
    },
    FieldRules {
        field: Field::Phone,
        rules: &[
            Rule::Required("Telefone é obrigatório"),
            Rule::Matches(Pattern::Phone, "Telefone inválido"),
        ],
    },
    FieldRules {
        field: Field::Cpf,
        rules: &[
            Rule::Required("CPF é obrigatório"),
            Rule::Matches(Pattern::Cpf, "CPF inválido"),
        ],
    },
    FieldRules {
        field: Field::Zipcode,
        rules: &[
            Rule::Required("CEP é obrigatório"),
            Rule::Matches(Pattern::Zipcode, "CEP inválido"),
        ],
    },
    FieldRules {
        field: Field::Address,
        rules: &[Rule::Required("Endereço é obrigatório")],
    },
    FieldRules {
        field: Field::City,
        rules: &[Rule::Required("Cidade é obrigatória")],
    },
    FieldRules {
        field: Field::Terms,
        rules: &[Rule::MustAccept("Aceite os termos e condições")],
    },
];

/// Validate the whole form, collecting every violation
pub fn validate(form: &RegistrationForm) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    for entry in REGISTRATION_SCHEMA {
        if let Some(message) = entry.rules.iter().find_map(|r| r.check(form, entry.field)) {
            errors.add(entry.field, message);
        }
    }

    // Cross-field: only once both sides passed their own rules
    let both_valid =
        !errors.contains(Field::Password) && !errors.contains(Field::PasswordConfirmation);
    if both_valid && form.password != form.password_confirmation {
        errors.add(Field::PasswordConfirmation, PASSWORD_MISMATCH);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
pub(crate) fn valid_form() -> RegistrationForm {
    RegistrationForm {
        name: "Maria da Silva".to_string(),
        email: "maria@example.com".to_string(),
        password: "segredo123".to_string(),
        password_confirmation: "segredo123".to_string(),
        phone: "(11) 98765-4321".to_string(),
        cpf: "123.456.789-09".to_string(),
        zipcode: "01001-000".to_string(),
        address: "Praça da Sé".to_string(),
        city: "São Paulo".to_string(),
        terms_accepted: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_valid_form_passes() {
        assert_eq!(validate(&valid_form()), Ok(()));
    }

    #[test]
    fn test_every_field_has_rules() {
        for field in Field::ALL {
            assert!(
                REGISTRATION_SCHEMA.iter().any(|r| r.field == field),
                "no rules for {field}"
            );
        }
    }

    #[test]
    fn test_missing_required_field_reports_only_that_field() {
        for field in Field::ALL {
            let mut form = valid_form();
            if field == Field::Terms {
                form.terms_accepted = false;
            } else {
                form.set(field, String::new().into()).unwrap();
            }

            let errors = validate(&form).unwrap_err();
            assert_eq!(errors.len(), 1, "unexpected errors for {field}: {errors:?}");
            assert!(errors.contains(field), "no error for {field}");
        }
    }

    #[test]
    fn test_empty_form_reports_every_field() {
        let errors = validate(&RegistrationForm::new()).unwrap_err();
        assert_eq!(errors.len(), Field::ALL.len());
        assert_eq!(errors.get(Field::Name), Some("Nome é obrigatório"));
        assert_eq!(errors.get(Field::Password), Some("Senha é obrigatória"));
        assert_eq!(
            errors.get(Field::PasswordConfirmation),
            Some("Confirmação de senha é obrigatória")
        );
        assert_eq!(errors.get(Field::Terms), Some("Aceite os termos e condições"));
    }

    #[test]
    fn test_whitespace_only_is_missing() {
        let mut form = valid_form();
        form.city = "   ".to_string();
        let errors = validate(&form).unwrap_err();
        assert_eq!(errors.get(Field::City), Some("Cidade é obrigatória"));
    }

    #[test]
    fn test_password_mismatch_reported_on_confirmation() {
        let mut form = valid_form();
        form.password = "segredo123".to_string();
        form.password_confirmation = "segredo124".to_string();

        let errors = validate(&form).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(Field::PasswordConfirmation), Some(PASSWORD_MISMATCH));
        assert!(!errors.contains(Field::Password));
    }

    #[test]
    fn test_mismatch_does_not_hide_other_violations() {
        let mut form = valid_form();
        form.password_confirmation = "outrasenha".to_string();
        form.cpf = "12345678909".to_string();
        form.email = String::new();

        let errors = validate(&form).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert_eq!(errors.get(Field::PasswordConfirmation), Some(PASSWORD_MISMATCH));
        assert_eq!(errors.get(Field::Cpf), Some("CPF inválido"));
        assert_eq!(errors.get(Field::Email), Some("E-mail é obrigatório"));
    }

    #[test]
    fn test_short_confirmation_keeps_length_message() {
        let mut form = valid_form();
        form.password_confirmation = "curta".to_string();
        let errors = validate(&form).unwrap_err();
        assert_eq!(
            errors.get(Field::PasswordConfirmation),
            Some("Confirmação de senha deve ter no mínimo 8 caracteres")
        );
    }

    #[test]
    fn test_name_length_counts_characters() {
        let mut form = valid_form();
        form.name = "é".repeat(255);
        assert!(validate(&form).is_ok());

        form.name.push('a');
        let errors = validate(&form).unwrap_err();
        assert_eq!(
            errors.get(Field::Name),
            Some("Nome deve ter no máximo 255 caracteres")
        );
    }

    #[test]
    fn test_patterns() {
        assert!(Pattern::Phone.is_match("(81) 91234-5678"));
        assert!(!Pattern::Phone.is_match("81 91234-5678"));
        assert!(!Pattern::Phone.is_match("(81) 1234-5678"));

        assert!(Pattern::Cpf.is_match("529.982.247-25"));
        assert!(!Pattern::Cpf.is_match("529982247-25"));

        assert!(Pattern::Zipcode.is_match("50030-230"));
        assert!(!Pattern::Zipcode.is_match("50030230"));
        assert!(!Pattern::Zipcode.is_match("50030-2301"));

        assert!(Pattern::Email.is_match("joao.p+tag@mail.com.br"));
        assert!(!Pattern::Email.is_match("joao@mail"));
        assert!(!Pattern::Email.is_match("joao mail.com"));
    }

    #[test]
    fn test_terms_must_be_true() {
        let mut form = valid_form();
        form.terms_accepted = false;
        let errors = validate(&form).unwrap_err();
        assert_eq!(errors.get(Field::Terms), Some("Aceite os termos e condições"));
    }
}
