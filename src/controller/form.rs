//! The "new multi-signature" form.

use crate::consts::cli_consts::DEFAULT_REQUIRED_SIGNATURES;

/// Editable fields of the creation form, in focus order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, strum::Display)]
pub enum FormField {
    #[default]
    Name,
    Amount,
    RequiredSignatures,
    Description,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            FormField::Name => FormField::Amount,
            FormField::Amount => FormField::RequiredSignatures,
            FormField::RequiredSignatures => FormField::Description,
            FormField::Description => FormField::Name,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            FormField::Name => FormField::Description,
            FormField::Amount => FormField::Name,
            FormField::RequiredSignatures => FormField::Amount,
            FormField::Description => FormField::RequiredSignatures,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FormField::Name => "Multi-Sig Name",
            FormField::Amount => "Amount (FHE Encrypted)",
            FormField::RequiredSignatures => "Required Signatures",
            FormField::Description => "Description",
        }
    }
}

/// Raw form input. Values are kept as typed and parsed on submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateForm {
    pub name: String,
    pub amount: String,
    pub description: String,
    pub required_signatures: String,
    pub focus: FormField,
}

impl Default for CreateForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            amount: String::new(),
            description: String::new(),
            required_signatures: DEFAULT_REQUIRED_SIGNATURES.to_string(),
            focus: FormField::Name,
        }
    }
}

impl CreateForm {
    /// Amount to encrypt; 0 when the input does not start with digits.
    pub fn amount_value(&self) -> u64 {
        parse_leading_integer(&self.amount).unwrap_or(0)
    }

    /// Signature threshold; the default when missing, zero or unparseable.
    pub fn required_signatures_value(&self) -> u32 {
        parse_leading_integer(&self.required_signatures)
            .and_then(|value| u32::try_from(value).ok())
            .filter(|value| *value > 0)
            .unwrap_or(DEFAULT_REQUIRED_SIGNATURES)
    }

    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Amount => &self.amount,
            FormField::RequiredSignatures => &self.required_signatures,
            FormField::Description => &self.description,
        }
    }

    fn field_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Name => &mut self.name,
            FormField::Amount => &mut self.amount,
            FormField::RequiredSignatures => &mut self.required_signatures,
            FormField::Description => &mut self.description,
        }
    }

    /// Types a character into the focused field. Numeric fields only take digits.
    pub fn push_char(&mut self, c: char) {
        let numeric = matches!(
            self.focus,
            FormField::Amount | FormField::RequiredSignatures
        );
        if numeric && !c.is_ascii_digit() {
            return;
        }
        self.field_mut(self.focus).push(c);
    }

    pub fn pop_char(&mut self) {
        self.field_mut(self.focus).pop();
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_previous(&mut self) {
        self.focus = self.focus.previous();
    }
}

/// Reads an unsigned integer from the leading digits of `input`, ignoring
/// surrounding whitespace and anything after the digits.
fn parse_leading_integer(input: &str) -> Option<u64> {
    let trimmed = input.trim_start();
    let trimmed = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    trimmed[..end].parse().ok()
}
