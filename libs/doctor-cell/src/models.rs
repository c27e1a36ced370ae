use shared_models::request::ImageUpload;

/// Multipart payload the admin submits to create a doctor.
#[derive(Debug, Clone)]
pub struct DoctorForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub speciality: String,
    pub degree: String,
    pub experience: u32,
    pub fees: f64,
    pub about: String,
    pub address_line1: String,
    pub address_line2: Option<String>,
    pub image: Option<ImageUpload>,
}

/// Partial update for an existing doctor; only set fields travel.
#[derive(Debug, Clone, Default)]
pub struct UpdateDoctorForm {
    pub name: Option<String>,
    pub speciality: Option<String>,
    pub degree: Option<String>,
    pub experience: Option<u32>,
    pub fees: Option<f64>,
    pub about: Option<String>,
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
    pub available: Option<bool>,
    pub image: Option<ImageUpload>,
}
