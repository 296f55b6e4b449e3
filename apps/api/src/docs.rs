use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

use appointment_cell::handlers as appointments;
use appointment_cell::models::{CreateAppointmentRequest, UpdateStatusRequest};
use auth_cell::handlers as auth;
use contact_cell::handlers as contact;
use contact_cell::models::ContactRequest;
use doctor_cell::handlers as doctors;
use doctor_cell::models::{CreateDoctorRequest, UpdateDoctorRequest};
use property_cell::handlers as properties;
use property_cell::models::CreatePropertyRequest;
use shared_models::auth::{Identity, TokenResponse};
use user_cell::handlers as user;
use user_cell::models::{
    Allergy, BasicInfo, ContactInfo, Measurement, MedicalCondition, MedicalInfo, MedicalOperation,
    Medication, PatientNote, UserProfileUpdate,
};

use crate::router;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearerAuth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

#[derive(OpenApi)]
#[openapi(
        modifiers(&SecurityAddon),
        info(
            title = "Clinic Booking API",
            description = "Doctors, appointments, patient profiles, contact messages and property listings",
        ),
        paths(
            router::health,

            auth::validate_token,
            auth::verify_token,
            auth::get_identity,

            doctors::get_all_doctors,
            doctors::get_doctor_by_id,
            doctors::get_doctors_by_specialization,
            doctors::search_doctors,
            doctors::create_doctor,
            doctors::update_doctor,
            doctors::delete_doctor,

            appointments::create_appointment,
            appointments::get_appointments,
            appointments::update_appointment_status,

            user::get_user_profile,
            user::update_user_basic_info,
            user::update_user_contact_info,
            user::update_user_medical_info,
            user::update_user_profile,

            contact::create_contact,
            contact::get_all_contacts,
            contact::get_contact_by_id,

            properties::get_all_properties,
            properties::get_property_by_id,
            properties::create_property,
            properties::delete_property,
        ),
        components(
            schemas(
                Identity,
                TokenResponse,
                CreateDoctorRequest,
                UpdateDoctorRequest,
                CreateAppointmentRequest,
                UpdateStatusRequest,
                Measurement,
                BasicInfo,
                ContactInfo,
                MedicalCondition,
                Allergy,
                Medication,
                MedicalOperation,
                PatientNote,
                MedicalInfo,
                UserProfileUpdate,
                ContactRequest,
                CreatePropertyRequest,
            ),
        ),
        tags(
            (name = "Health", description = "Liveness"),
            (name = "Auth", description = "Bearer token checks"),
            (name = "Doctors", description = "Doctor profiles"),
            (name = "Appointments", description = "Appointment booking and status"),
            (name = "User", description = "The caller's own profile"),
            (name = "Contact", description = "Contact form submissions"),
            (name = "Property", description = "Property listings"),
        )
    )]
pub struct ApiDoc;
