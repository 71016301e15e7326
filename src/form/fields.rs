use form_urlencoded::Serializer;

/// Ordered snapshot of a form's field values at submission time. Keys are
/// unique per form; order is field declaration order.
#[derive(Debug, Clone, Default)]
pub struct FieldSet {
    entries: Vec<(String, String)>,
}

impl FieldSet {
    pub fn new(entries: Vec<(String, String)>) -> Self {
        FieldSet { entries }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// URL-encode the fields as query parameters, in field order.
    pub fn encode(&self) -> String {
        let mut serializer = Serializer::new(String::new());
        for (key, value) in self.iter() {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }
}
