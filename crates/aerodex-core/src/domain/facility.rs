use serde::{Deserialize, Serialize};

/// Raw facility record as published by aviationapi.com.
///
/// Every attribute is an optional string copied verbatim from the provider;
/// coordinates, elevations, and dates are never interpreted here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacilityRecord {
    pub site_number: Option<String>,
    #[serde(rename = "type")]
    pub facility_type: Option<String>,
    pub facility_name: Option<String>,
    pub faa_ident: Option<String>,
    pub icao_ident: Option<String>,
    pub region: Option<String>,
    pub district_office: Option<String>,
    pub state: Option<String>,
    pub state_full: Option<String>,
    pub county: Option<String>,
    pub city: Option<String>,
    pub ownership: Option<String>,
    #[serde(rename = "use")]
    pub facility_use: Option<String>,
    pub manager: Option<String>,
    pub manager_phone: Option<String>,
    pub latitude: Option<String>,
    pub latitude_sec: Option<String>,
    pub longitude: Option<String>,
    pub longitude_sec: Option<String>,
    pub elevation: Option<String>,
    pub magnetic_variation: Option<String>,
    pub tpa: Option<String>,
    pub vfr_sectional: Option<String>,
    pub boundary_artcc: Option<String>,
    pub boundary_artcc_name: Option<String>,
    pub responsible_artcc: Option<String>,
    pub responsible_artcc_name: Option<String>,
    pub fss_phone_number: Option<String>,
    // The upstream payload misspells this key.
    #[serde(rename = "fss_phone_numer_tollfree")]
    pub fss_phone_number_tollfree: Option<String>,
    pub notam_facility_ident: Option<String>,
    pub status: Option<String>,
    #[serde(rename = "certification_typedate")]
    pub certification_type_date: Option<String>,
    pub customs_airport_of_entry: Option<String>,
    pub military_joint_use: Option<String>,
    pub military_landing: Option<String>,
    pub lighting_schedule: Option<String>,
    pub beacon_schedule: Option<String>,
    pub control_tower: Option<String>,
    pub unicom: Option<String>,
    pub ctaf: Option<String>,
    pub effective_date: Option<String>,
}

/// Public facility response returned to callers (camelCase on the wire).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacilityResponse {
    pub site_number: Option<String>,
    #[serde(rename = "type")]
    pub facility_type: Option<String>,
    pub facility_name: Option<String>,
    pub faa_ident: Option<String>,
    pub icao_ident: Option<String>,
    pub region: Option<String>,
    pub district_office: Option<String>,
    pub state: Option<String>,
    pub state_full: Option<String>,
    pub county: Option<String>,
    pub city: Option<String>,
    pub ownership: Option<String>,
    #[serde(rename = "use")]
    pub facility_use: Option<String>,
    pub manager: Option<String>,
    pub manager_phone: Option<String>,
    pub latitude: Option<String>,
    pub latitude_sec: Option<String>,
    pub longitude: Option<String>,
    pub longitude_sec: Option<String>,
    pub elevation: Option<String>,
    pub magnetic_variation: Option<String>,
    pub tpa: Option<String>,
    pub vfr_sectional: Option<String>,
    pub boundary_artcc: Option<String>,
    pub boundary_artcc_name: Option<String>,
    pub responsible_artcc: Option<String>,
    pub responsible_artcc_name: Option<String>,
    pub fss_phone_number: Option<String>,
    pub fss_phone_number_tollfree: Option<String>,
    pub notam_facility_ident: Option<String>,
    pub status: Option<String>,
    pub certification_type_date: Option<String>,
    pub customs_airport_of_entry: Option<String>,
    pub military_joint_use: Option<String>,
    pub military_landing: Option<String>,
    pub lighting_schedule: Option<String>,
    pub beacon_schedule: Option<String>,
    pub control_tower: Option<String>,
    pub unicom: Option<String>,
    pub ctaf: Option<String>,
    pub effective_date: Option<String>,
}

macro_rules! passthrough {
    ($record:ident => $($field:ident),+ $(,)?) => {
        FacilityResponse {
            $($field: $record.$field),+
        }
    };
}

impl From<FacilityRecord> for FacilityResponse {
    fn from(record: FacilityRecord) -> Self {
        passthrough!(record =>
            site_number,
            facility_type,
            facility_name,
            faa_ident,
            icao_ident,
            region,
            district_office,
            state,
            state_full,
            county,
            city,
            ownership,
            facility_use,
            manager,
            manager_phone,
            latitude,
            latitude_sec,
            longitude,
            longitude_sec,
            elevation,
            magnetic_variation,
            tpa,
            vfr_sectional,
            boundary_artcc,
            boundary_artcc_name,
            responsible_artcc,
            responsible_artcc_name,
            fss_phone_number,
            fss_phone_number_tollfree,
            notam_facility_ident,
            status,
            certification_type_date,
            customs_airport_of_entry,
            military_joint_use,
            military_landing,
            lighting_schedule,
            beacon_schedule,
            control_tower,
            unicom,
            ctaf,
            effective_date,
        )
    }
}
