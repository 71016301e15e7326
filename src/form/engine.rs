use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use serde_json::Value;

use super::descriptor::FormDescriptor;
use super::fields::FieldSet;
use super::render;
use super::{FormError, Notifier, ResultSink, SubmitOutcome};

/// One registered form: its descriptor, live field values, result sink, and
/// the in-flight flag standing in for the disabled submit control.
struct RegisteredForm {
    descriptor: FormDescriptor,
    values: Mutex<Vec<(String, String)>>,
    in_flight: AtomicBool,
    sink: Arc<dyn ResultSink>,
}

impl RegisteredForm {
    fn snapshot(&self) -> FieldSet {
        FieldSet::new(self.values.lock().expect("form state lock poisoned").clone())
    }

    fn reset(&self) {
        let defaults = self
            .descriptor
            .fields
            .iter()
            .map(|f| (f.name.clone(), f.default.clone()))
            .collect();
        *self.values.lock().expect("form state lock poisoned") = defaults;
    }
}

/// Releases the in-flight flag when the cycle ends, whichever branch ended it.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Drives the submission cycle for a set of registered forms. Forms are
/// independent; cycles for distinct forms may overlap freely, while a form
/// with a cycle in flight rejects re-entry.
pub struct FormEngine {
    client: reqwest::Client,
    base_url: String,
    notifier: Arc<dyn Notifier>,
    forms: HashMap<String, Arc<RegisteredForm>>,
}

impl FormEngine {
    pub fn new(base_url: impl Into<String>, notifier: Arc<dyn Notifier>) -> Self {
        FormEngine {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to build reqwest client"),
            base_url: base_url.into(),
            notifier,
            forms: HashMap::new(),
        }
    }

    /// Register a form descriptor together with its result sink. Fields start
    /// at their declared defaults.
    pub fn register(&mut self, descriptor: FormDescriptor, sink: Arc<dyn ResultSink>) {
        let values = descriptor
            .fields
            .iter()
            .map(|f| (f.name.clone(), f.default.clone()))
            .collect();
        self.forms.insert(
            descriptor.id.clone(),
            Arc::new(RegisteredForm {
                descriptor,
                values: Mutex::new(values),
                in_flight: AtomicBool::new(false),
                sink,
            }),
        );
    }

    pub fn set_field(
        &self,
        form_id: &str,
        name: &str,
        value: impl Into<String>,
    ) -> Result<(), FormError> {
        let form = self.form(form_id)?;
        let mut values = form.values.lock().expect("form state lock poisoned");
        match values.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => {
                *v = value.into();
                Ok(())
            }
            None => Err(FormError::from(format!(
                "form `{form_id}` has no field `{name}`"
            ))),
        }
    }

    pub fn field_values(&self, form_id: &str) -> Result<Vec<(String, String)>, FormError> {
        Ok(self
            .form(form_id)?
            .values
            .lock()
            .expect("form state lock poisoned")
            .clone())
    }

    /// Run one submission cycle: snapshot the fields, issue the GET, and
    /// either render the decoded body or raise a notification. The in-flight
    /// flag is released exactly once on every path.
    pub async fn submit(&self, form_id: &str) -> Result<SubmitOutcome, FormError> {
        let form = self.form(form_id)?;

        // The disabled submit control: a cycle already in flight blocks re-entry.
        if form
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Ok(SubmitOutcome::Busy);
        }
        let _guard = InFlightGuard(&form.in_flight);

        let url = format!(
            "{}?{}",
            self.resolve_action(&form.descriptor.action),
            form.snapshot().encode()
        );

        let resp = match self.client.get(&url).send().await {
            Ok(resp) => resp,
            Err(e) => {
                self.notifier.alert(&e.to_string());
                return Ok(SubmitOutcome::Notified);
            }
        };

        // A success status clears the fields before the body is even decoded.
        if resp.status().is_success() {
            form.reset();
        }

        let body = match resp.json::<Value>().await {
            Ok(body) => body,
            Err(e) => {
                self.notifier.alert(&e.to_string());
                return Ok(SubmitOutcome::Notified);
            }
        };

        let Some(record) = body.as_object() else {
            self.notifier.alert("response body is not a flat JSON object");
            return Ok(SubmitOutcome::Notified);
        };

        form.sink.replace(&render::render_record(record));
        Ok(SubmitOutcome::Rendered)
    }

    fn form(&self, form_id: &str) -> Result<&Arc<RegisteredForm>, FormError> {
        self.forms
            .get(form_id)
            .ok_or_else(|| FormError::from(format!("unknown form: {form_id}")))
    }

    fn resolve_action(&self, action: &str) -> String {
        if action.starts_with("http://") || action.starts_with("https://") {
            action.to_string()
        } else {
            format!("{}{}", self.base_url.trim_end_matches('/'), action)
        }
    }
}
