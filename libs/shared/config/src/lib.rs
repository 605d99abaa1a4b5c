use std::env;
use std::str::FromStr;
use tracing::warn;

pub const DEFAULT_SERVER_PORT: u16 = 3000;
pub const DEFAULT_PATIENT_ID_MIN: u32 = 1000;
pub const DEFAULT_PATIENT_ID_MAX: u32 = 9999;
pub const DEFAULT_PATIENT_ID_PROBE_ATTEMPTS: u32 = 10_000;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_port: u16,
    pub patient_id_min: u32,
    pub patient_id_max: u32,
    pub patient_id_probe_attempts: u32,
    pub provider_roster_path: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_port: DEFAULT_SERVER_PORT,
            patient_id_min: DEFAULT_PATIENT_ID_MIN,
            patient_id_max: DEFAULT_PATIENT_ID_MAX,
            patient_id_probe_attempts: DEFAULT_PATIENT_ID_PROBE_ATTEMPTS,
            provider_roster_path: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            server_port: parse_var("SERVER_PORT", DEFAULT_SERVER_PORT),
            patient_id_min: parse_var("PATIENT_ID_MIN", DEFAULT_PATIENT_ID_MIN),
            patient_id_max: parse_var("PATIENT_ID_MAX", DEFAULT_PATIENT_ID_MAX),
            patient_id_probe_attempts: parse_var(
                "PATIENT_ID_PROBE_ATTEMPTS",
                DEFAULT_PATIENT_ID_PROBE_ATTEMPTS,
            ),
            provider_roster_path: env::var("PROVIDER_ROSTER_PATH")
                .ok()
                .filter(|path| !path.trim().is_empty()),
        };

        if config.provider_roster_path.is_none() {
            warn!("PROVIDER_ROSTER_PATH not set, using built-in clinic roster");
        }

        if !config.is_valid() {
            warn!(
                "Patient ID range {}..={} is invalid (must be non-empty and start at 1 or above)",
                config.patient_id_min, config.patient_id_max
            );
        }

        config
    }

    /// Patient ID 0 is reserved as the "most recent patient" marker in bookings.
    pub fn is_valid(&self) -> bool {
        self.patient_id_min >= 1 && self.patient_id_min <= self.patient_id_max
    }

    pub fn patient_id_capacity(&self) -> u64 {
        if self.is_valid() {
            u64::from(self.patient_id_max - self.patient_id_min) + 1
        } else {
            0
        }
    }
}

fn parse_var<T>(name: &str, default: T) -> T
where
    T: FromStr + std::fmt::Display + Copy,
{
    match env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("{} has invalid value {:?}, using default {}", name, raw, default);
            default
        }),
        Err(_) => {
            warn!("{} not set, using default {}", name, default);
            default
        }
    }
}
