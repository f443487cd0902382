use std::sync::Arc;

use base64::{engine::general_purpose, Engine as _};
use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use serde_json::json;
use sha2::Sha256;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::auth::User;

pub struct TestConfig {
    pub jwt_secret: String,
    pub store_url: String,
    pub store_api_key: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "test-secret-key-for-jwt-validation-must-be-long-enough".to_string(),
            store_url: "http://localhost:54321".to_string(),
            store_api_key: "test-api-key".to_string(),
        }
    }
}

impl TestConfig {
    pub fn with_store_url(store_url: &str) -> Self {
        Self {
            store_url: store_url.to_string(),
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            store_url: self.store_url.clone(),
            store_api_key: self.store_api_key.clone(),
            jwt_secret: self.jwt_secret.clone(),
            bind_addr: "127.0.0.1:0".to_string(),
        }
    }

    pub fn to_arc(&self) -> Arc<AppConfig> {
        Arc::new(self.to_app_config())
    }
}

pub struct TestUser {
    pub id: String,
    pub email: String,
    pub role: String,
}

impl Default for TestUser {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email: "test@example.com".to_string(),
            role: "patient".to_string(),
        }
    }
}

impl TestUser {
    pub fn new(email: &str, role: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            role: role.to_string(),
        }
    }

    pub fn doctor(email: &str) -> Self {
        Self::new(email, "doctor")
    }

    pub fn patient(email: &str) -> Self {
        Self::new(email, "patient")
    }

    pub fn admin(email: &str) -> Self {
        Self::new(email, "admin")
    }

    pub fn to_user(&self) -> User {
        User {
            id: self.id.clone(),
            email: Some(self.email.clone()),
            role: Some(self.role.clone()),
            metadata: None,
            created_at: Some(Utc::now()),
        }
    }
}

pub struct JwtTestUtils;

impl JwtTestUtils {
    pub fn create_test_token(user: &TestUser, secret: &str, exp_hours: Option<i64>) -> String {
        let now = Utc::now();
        let exp = now + Duration::hours(exp_hours.unwrap_or(24));

        let header = json!({
            "alg": "HS256",
            "typ": "JWT"
        });

        let payload = json!({
            "sub": user.id,
            "email": user.email,
            "role": user.role,
            "iat": now.timestamp(),
            "exp": exp.timestamp()
        });

        let header_encoded = general_purpose::URL_SAFE_NO_PAD.encode(header.to_string());
        let payload_encoded = general_purpose::URL_SAFE_NO_PAD.encode(payload.to_string());

        let signing_input = format!("{}.{}", header_encoded, payload_encoded);

        let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(signing_input.as_bytes());
        let signature = mac.finalize().into_bytes();
        let signature_encoded = general_purpose::URL_SAFE_NO_PAD.encode(signature);

        format!("{}.{}", signing_input, signature_encoded)
    }

    pub fn create_expired_token(user: &TestUser, secret: &str) -> String {
        Self::create_test_token(user, secret, Some(-1))
    }

    pub fn create_invalid_signature_token(user: &TestUser) -> String {
        Self::create_test_token(user, "wrong-secret", Some(24))
    }

    pub fn create_malformed_token() -> String {
        "invalid.token.format".to_string()
    }
}

pub struct MockStoreResponses;

impl MockStoreResponses {
    pub fn appointment_response(
        appointment_id: &str,
        patient_id: &str,
        doctor_id: &str,
        date: &str,
        status: &str,
    ) -> serde_json::Value {
        json!({
            "id": appointment_id,
            "index_no": "APP0002",
            "name": "Test Patient",
            "address": "12 Lake Road, Colombo",
            "nic": "982760114V",
            "phone": "0771234567",
            "email": "patient@example.com",
            "doctor_name": "Dr. Test",
            "doctor_id": doctor_id,
            "specialization": "Cardiology",
            "date": date,
            "time": "10:30 AM",
            "patient_id": patient_id,
            "appointment_type": "General Checkup",
            "status": status
        })
    }

    pub fn rejected_appointment_response(
        rejected_id: &str,
        original_appointment_id: &str,
        patient_id: &str,
        doctor_id: &str,
    ) -> serde_json::Value {
        json!({
            "id": rejected_id,
            "index_no": "APP0002",
            "name": "Test Patient",
            "address": "12 Lake Road, Colombo",
            "nic": "982760114V",
            "phone": "0771234567",
            "email": "patient@example.com",
            "doctor_name": "Dr. Test",
            "doctor_id": doctor_id,
            "specialization": "Cardiology",
            "date": "2025-07-01",
            "time": "10:30 AM",
            "patient_id": patient_id,
            "status": "Rejected",
            "rejection_reason": "Doctor unavailable on this date",
            "rejected_at": "2025-06-20T08:00:00Z",
            "original_appointment_id": original_appointment_id
        })
    }

    pub fn doctor_leave_response(
        leave_id: &str,
        doctor_id: &str,
        start_date: &str,
        end_date: &str,
        status: &str,
    ) -> serde_json::Value {
        json!({
            "id": leave_id,
            "doctor_id": doctor_id,
            "leave_type": "Annual Leave",
            "start_date": start_date,
            "end_date": end_date,
            "reason": "",
            "status": status
        })
    }

    pub fn diagnosis_response(diagnosis_id: &str, appointment_id: &str, doctor_id: &str) -> serde_json::Value {
        json!({
            "id": diagnosis_id,
            "appointment_id": appointment_id,
            "patient_id": Uuid::new_v4(),
            "doctor_id": doctor_id,
            "symptoms": ["Chest Pain", "Sweating"],
            "assumed_illness": "Angina",
            "description": "Recurring chest pain on exertion",
            "notes": "Follow up in two weeks",
            "status": "Pending"
        })
    }

    pub fn prescription_response(prescription_id: &str, appointment_id: &str, doctor_id: &str) -> serde_json::Value {
        json!({
            "id": prescription_id,
            "appointment_id": appointment_id,
            "doctor_id": doctor_id,
            "patient_id": Uuid::new_v4(),
            "medicine": [
                {
                    "medicine_name": "Amoxicillin",
                    "dosage": "500mg twice daily",
                    "description": "Take after meals"
                }
            ],
            "notes": "Complete the full course",
            "date_issued": "2025-06-20T08:00:00Z",
            "is_voided": false,
            "void_reason": null,
            "corrected_by": null
        })
    }

    pub fn error_response(message: &str, code: &str) -> serde_json::Value {
        json!({
            "error": {
                "message": message,
                "code": code
            }
        })
    }
}
