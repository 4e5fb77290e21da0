//! Form state for the single-prediction page.
//!
//! Groups the twenty feature signals into one struct that owns reset
//! and conversion to the request payload. `RwSignal` is `Copy`, which
//! keeps the struct cheap to hand to child components.

use leptos::prelude::*;

use crate::models::PredictRequest;

#[derive(Clone, Copy)]
pub struct FormState {
    pub customer_id: RwSignal<String>,
    pub gender: RwSignal<String>,
    pub senior_citizen: RwSignal<String>,
    pub partner: RwSignal<String>,
    pub dependents: RwSignal<String>,
    pub tenure: RwSignal<String>,
    pub phone_service: RwSignal<String>,
    pub multiple_lines: RwSignal<String>,
    pub internet_service: RwSignal<String>,
    pub online_security: RwSignal<String>,
    pub online_backup: RwSignal<String>,
    pub device_protection: RwSignal<String>,
    pub tech_support: RwSignal<String>,
    pub streaming_tv: RwSignal<String>,
    pub streaming_movies: RwSignal<String>,
    pub contract: RwSignal<String>,
    pub paperless_billing: RwSignal<String>,
    pub payment_method: RwSignal<String>,
    pub monthly_charges: RwSignal<String>,
    pub total_charges: RwSignal<String>,
}

impl FormState {
    pub fn new() -> Self {
        Self {
            customer_id: RwSignal::new(String::new()),
            gender: RwSignal::new(String::new()),
            senior_citizen: RwSignal::new(String::new()),
            partner: RwSignal::new(String::new()),
            dependents: RwSignal::new(String::new()),
            tenure: RwSignal::new(String::new()),
            phone_service: RwSignal::new(String::new()),
            multiple_lines: RwSignal::new(String::new()),
            internet_service: RwSignal::new(String::new()),
            online_security: RwSignal::new(String::new()),
            online_backup: RwSignal::new(String::new()),
            device_protection: RwSignal::new(String::new()),
            tech_support: RwSignal::new(String::new()),
            streaming_tv: RwSignal::new(String::new()),
            streaming_movies: RwSignal::new(String::new()),
            contract: RwSignal::new(String::new()),
            paperless_billing: RwSignal::new(String::new()),
            payment_method: RwSignal::new(String::new()),
            monthly_charges: RwSignal::new(String::new()),
            total_charges: RwSignal::new(String::new()),
        }
    }

    pub fn reset(&self) {
        for field in self.text_fields() {
            field.set(String::new());
        }
    }

    fn text_fields(&self) -> [RwSignal<String>; 20] {
        [
            self.customer_id,
            self.gender,
            self.senior_citizen,
            self.partner,
            self.dependents,
            self.tenure,
            self.phone_service,
            self.multiple_lines,
            self.internet_service,
            self.online_security,
            self.online_backup,
            self.device_protection,
            self.tech_support,
            self.streaming_tv,
            self.streaming_movies,
            self.contract,
            self.paperless_billing,
            self.payment_method,
            self.monthly_charges,
            self.total_charges,
        ]
    }

    /// Convert the form into a request payload. Only non-empty and
    /// numeric-parse checks happen here; real validation is the
    /// backend's job.
    pub fn to_request(&self) -> Result<PredictRequest, String> {
        if self.text_fields().iter().any(|f| f.get().trim().is_empty()) {
            return Err("Form incomplete — please fill all fields!".to_string());
        }

        let senior_citizen: i32 = self
            .senior_citizen
            .get()
            .trim()
            .parse()
            .map_err(|_| "Senior Citizen must be 0 or 1".to_string())?;
        let tenure: i32 = self
            .tenure
            .get()
            .trim()
            .parse()
            .map_err(|_| "Tenure must be a whole number of months".to_string())?;
        let monthly_charges: f64 = self
            .monthly_charges
            .get()
            .trim()
            .parse()
            .map_err(|_| "Monthly Charges must be a number".to_string())?;
        let total_charges: f64 = self
            .total_charges
            .get()
            .trim()
            .parse()
            .map_err(|_| "Total Charges must be a number".to_string())?;

        Ok(PredictRequest {
            customer_id: self.customer_id.get(),
            gender: self.gender.get(),
            senior_citizen,
            partner: self.partner.get(),
            dependents: self.dependents.get(),
            tenure,
            phone_service: self.phone_service.get(),
            multiple_lines: self.multiple_lines.get(),
            internet_service: self.internet_service.get(),
            online_security: self.online_security.get(),
            online_backup: self.online_backup.get(),
            device_protection: self.device_protection.get(),
            tech_support: self.tech_support.get(),
            streaming_tv: self.streaming_tv.get(),
            streaming_movies: self.streaming_movies.get(),
            contract: self.contract.get(),
            paperless_billing: self.paperless_billing.get(),
            payment_method: self.payment_method.get(),
            monthly_charges,
            total_charges,
        })
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}
