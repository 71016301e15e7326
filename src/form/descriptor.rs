/// A declared form field with its default value.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: String,
    pub default: String,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>) -> Self {
        FieldSpec {
            name: name.into(),
            default: String::new(),
        }
    }

    pub fn with_default(name: impl Into<String>, default: impl Into<String>) -> Self {
        FieldSpec {
            name: name.into(),
            default: default.into(),
        }
    }
}

/// Registration unit for one form: where it submits to and which fields it
/// carries, in declaration order.
#[derive(Debug, Clone)]
pub struct FormDescriptor {
    pub id: String,
    pub action: String,
    pub fields: Vec<FieldSpec>,
}

impl FormDescriptor {
    pub fn new(id: impl Into<String>, action: impl Into<String>, fields: Vec<FieldSpec>) -> Self {
        FormDescriptor {
            id: id.into(),
            action: action.into(),
            fields,
        }
    }
}
