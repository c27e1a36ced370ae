use std::sync::{Arc, RwLock};

use reqwest::multipart::{Form, Part};
use reqwest::Method;
use tracing::debug;

use shared_api::ApiClient;
use shared_config::AppConfig;
use shared_models::doctor::Doctor;
use shared_models::error::ClientError;
use shared_models::request::RequestState;
use shared_utils::image::normalize_image;

use crate::models::{DoctorForm, UpdateDoctorForm};

#[derive(Debug, Default)]
struct Inner {
    doctors: Vec<Doctor>,
    state: RequestState,
}

/// Ordered doctor collection as served by the API. Backs the public listing
/// and resolves a booking's doctor display data; admin mutations keep the
/// local order in sync with the server.
pub struct DoctorRoster {
    api: Arc<ApiClient>,
    asset_base_url: String,
    inner: RwLock<Inner>,
}

impl DoctorRoster {
    pub fn new(api: Arc<ApiClient>, config: &AppConfig) -> Self {
        Self {
            api,
            asset_base_url: config.asset_base_url.clone(),
            inner: RwLock::new(Inner::default()),
        }
    }

    pub fn doctors(&self) -> Vec<Doctor> {
        self.inner.read().unwrap().doctors.clone()
    }

    pub fn state(&self) -> RequestState {
        self.inner.read().unwrap().state.clone()
    }

    pub async fn fetch_all(&self) -> Result<Vec<Doctor>, ClientError> {
        debug!("Fetching doctor roster");
        self.inner.write().unwrap().state = RequestState::Pending;

        let result: Result<Vec<Doctor>, ClientError> =
            self.api.request(Method::GET, "/doctors", None).await;

        let mut inner = self.inner.write().unwrap();
        match result {
            Ok(mut doctors) => {
                for doctor in &mut doctors {
                    doctor.image = Some(normalize_image(doctor.image.as_ref(), &self.asset_base_url));
                }
                inner.doctors = doctors.clone();
                inner.state = RequestState::Succeeded;
                Ok(doctors)
            }
            Err(e) => {
                inner.state = RequestState::Failed(e.message().to_string());
                Err(e)
            }
        }
    }

    /// Cache hit by id, falling back to a single fetch. Used by the booking
    /// workflow when it lands on a doctor the listing has not loaded yet.
    pub async fn get(&self, doctor_id: &str) -> Result<Doctor, ClientError> {
        if let Some(doctor) = self
            .inner
            .read()
            .unwrap()
            .doctors
            .iter()
            .find(|d| d.id == doctor_id)
        {
            return Ok(doctor.clone());
        }

        debug!("Doctor {} not cached, fetching", doctor_id);
        let path = format!("/doctors/{}", doctor_id);
        let mut doctor: Doctor = self.api.request(Method::GET, &path, None).await?;
        doctor.image = Some(normalize_image(doctor.image.as_ref(), &self.asset_base_url));
        Ok(doctor)
    }

    pub async fn add(&self, form: DoctorForm) -> Result<Doctor, ClientError> {
        debug!("Adding doctor {}", form.name);

        let mut multipart = Form::new()
            .text("name", form.name)
            .text("email", form.email)
            .text("password", form.password)
            .text("speciality", form.speciality)
            .text("degree", form.degree)
            .text("experience", form.experience.to_string())
            .text("fees", form.fees.to_string())
            .text("about", form.about)
            .text("line1", form.address_line1);
        if let Some(line2) = form.address_line2 {
            multipart = multipart.text("line2", line2);
        }
        if let Some(image) = form.image {
            multipart = multipart.part("image", Part::bytes(image.bytes).file_name(image.file_name));
        }

        let mut doctor: Doctor = self
            .api
            .request_multipart(Method::POST, "/doctors", multipart)
            .await?;
        doctor.image = Some(normalize_image(doctor.image.as_ref(), &self.asset_base_url));

        self.inner.write().unwrap().doctors.push(doctor.clone());
        Ok(doctor)
    }

    pub async fn update(&self, doctor_id: &str, form: UpdateDoctorForm) -> Result<Doctor, ClientError> {
        debug!("Updating doctor {}", doctor_id);

        let mut multipart = Form::new();
        if let Some(name) = form.name {
            multipart = multipart.text("name", name);
        }
        if let Some(speciality) = form.speciality {
            multipart = multipart.text("speciality", speciality);
        }
        if let Some(degree) = form.degree {
            multipart = multipart.text("degree", degree);
        }
        if let Some(experience) = form.experience {
            multipart = multipart.text("experience", experience.to_string());
        }
        if let Some(fees) = form.fees {
            multipart = multipart.text("fees", fees.to_string());
        }
        if let Some(about) = form.about {
            multipart = multipart.text("about", about);
        }
        if let Some(line1) = form.address_line1 {
            multipart = multipart.text("line1", line1);
        }
        if let Some(line2) = form.address_line2 {
            multipart = multipart.text("line2", line2);
        }
        if let Some(available) = form.available {
            multipart = multipart.text("available", available.to_string());
        }
        if let Some(image) = form.image {
            multipart = multipart.part("image", Part::bytes(image.bytes).file_name(image.file_name));
        }

        let path = format!("/doctors/{}", doctor_id);
        let mut doctor: Doctor = self
            .api
            .request_multipart(Method::PUT, &path, multipart)
            .await?;
        doctor.image = Some(normalize_image(doctor.image.as_ref(), &self.asset_base_url));

        let mut inner = self.inner.write().unwrap();
        if let Some(existing) = inner.doctors.iter_mut().find(|d| d.id == doctor.id) {
            *existing = doctor.clone();
        }
        Ok(doctor)
    }

    pub async fn remove(&self, doctor_id: &str) -> Result<(), ClientError> {
        debug!("Removing doctor {}", doctor_id);

        let path = format!("/doctors/{}", doctor_id);
        let _: serde_json::Value = self.api.request(Method::DELETE, &path, None).await?;

        self.inner
            .write()
            .unwrap()
            .doctors
            .retain(|d| d.id != doctor_id);
        Ok(())
    }
}
