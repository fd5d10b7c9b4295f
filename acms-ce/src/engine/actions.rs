//! Action-item generation
//!
//! Maps a regulation's free-text requirements onto a concrete remediation
//! checklist. Matching is case-insensitive substring search, scoped by the
//! regulation's safety category; keyword groups inside one category are
//! independent and additive. Some groups add items for larger airports.
//! Deterministic: the same (regulation, airport) pair always produces the
//! same ordered list.

use acms_common::db::{Airport, Regulation};
use acms_common::types::{AirportSize, SafetyCategory};

use crate::engine::inference::effective_size;

/// Generate the remediation checklist for one applicable regulation
pub fn generate_action_items(regulation: &Regulation, airport: &Airport) -> Vec<String> {
    let text = regulation.requirements.to_lowercase();
    let size = effective_size(airport);
    let large_or_intl = matches!(size, AirportSize::Large | AirportSize::International);
    let medium_up = size != AirportSize::Small;

    let mentions = |keywords: &[&str]| keywords.iter().any(|k| text.contains(k));

    let mut items: Vec<String> = Vec::new();
    let mut push = |item: &str| items.push(item.to_string());

    match regulation.safety_category {
        SafetyCategory::OperationalSafety => {
            if mentions(&["sms", "safety management"]) {
                push("Develop and document an operational safety policy");
                push("Implement an operational risk management process");
                push("Establish a safety assurance process with internal audits");
                push("Create a safety promotion programme");
                if large_or_intl {
                    push("Commission an annual external audit of the SMS");
                }
            }
            if mentions(&["incident", "accident"]) {
                push("Implement an incident reporting and logging system");
                push("Establish the authority notification procedure (24h for serious occurrences)");
                push("Train staff in incident investigation");
            }
            if mentions(&["training"]) {
                push("Develop an initial training programme for new personnel");
                push("Establish an annual recurrent training programme");
                push("Keep records of all completed training");
            }
        }

        SafetyCategory::FireSafety => {
            if mentions(&["rescue and firefighting", "firefighting"]) {
                push("Determine the rescue and firefighting category from the largest aircraft in regular operation");
                push("Staff and train a firefighting team adequate to that category");
                push("Guarantee a maximum response time of three minutes");
                if medium_up {
                    push("Procure certified firefighting vehicles");
                }
            }
            if mentions(&["equipment", "extinguisher"]) {
                push("Install extinguishers in all areas required by the standard");
                push("Keep the hydrant system operational");
                push("Establish a monthly equipment inspection programme");
            }
            if mentions(&["detection", "alarm"]) {
                push("Install an automatic fire detection system");
                push("Integrate detection with the central monitoring station");
                push("Run weekly alarm system tests");
            }
        }

        SafetyCategory::Security => {
            if mentions(&["avsec", "aviation security"]) {
                push("Develop a documented aviation security programme");
                push("Train security staff to AVSEC standards");
                push("Implement access control for restricted areas");
            }
            if mentions(&["international", "customs"]) {
                push("Coordinate customs control with the revenue authority");
                push("Establish an immigration inspection area");
                push("Implement baggage tracking");
            }
            if mentions(&["screening", "baggage"]) {
                push("Procure X-ray equipment for baggage screening");
                push("Install metal detectors");
                push("Train and certify screening personnel");
            }
            if mentions(&["perimeter"]) {
                push("Assess and upgrade the perimeter fence");
                push("Install night lighting along the perimeter");
                push("Deploy camera surveillance of the perimeter");
                push("Establish a patrol routine");
            }
        }

        SafetyCategory::Infrastructure => {
            if mentions(&["runway", "apron"]) {
                push("Establish a daily runway inspection routine");
                push("Implement preventive apron maintenance");
                push("Ensure markings and signage meet ICAO standards");
            }
            if mentions(&["signage", "marking"]) {
                push("Audit existing signage against ICAO standards");
                push("Refresh runway markings where required");
                push("Verify visibility of identification signs");
            }
            if mentions(&["lighting"]) {
                push("Verify runway lighting system operation");
                push("Provide backup power for emergencies");
                push("Establish preventive lighting maintenance");
            }
            if mentions(&["drainage"]) {
                push("Inspect the drainage system after heavy rain");
                push("Clean and maintain channels and culverts");
                push("Assess the need for structural improvements");
            }
            if mentions(&["cargo"]) {
                push("Provide adequate covered cargo handling areas");
                push("Procure cargo handling equipment");
                push("Implement temperature control where required");
            }
        }

        SafetyCategory::EmergencyResponse => {
            if mentions(&["emergency plan"]) {
                push("Develop a documented airport emergency plan");
                push("Coordinate with external agencies (fire brigade, police, health services)");
                push("Run a full-scale exercise every two years");
                push("Run partial exercises annually");
            }
            if mentions(&["communication"]) {
                push("Verify the emergency communication system");
                push("Issue radios to response teams");
                push("Establish monthly communication tests");
            }
            if mentions(&["rescue", "ambulance"]) {
                push("Guarantee ambulance availability");
                push("Procure adequate rescue equipment");
                push("Establish a medical facility in the terminal");
            }
        }

        SafetyCategory::Environmental => {
            if mentions(&["noise"]) {
                push("Install a noise monitoring system");
                push("Establish quarterly noise reporting");
                push("Develop mitigation measures where required");
            }
            if mentions(&["waste"]) {
                push("Develop a waste management plan");
                push("Implement waste segregation");
                push("Guarantee proper disposal of hazardous waste");
            }
            if mentions(&["emission"]) {
                push("Implement air quality monitoring");
                push("Assess emission reduction measures");
                push("Prioritise electric ground equipment where possible");
            }
        }

        SafetyCategory::WildlifeManagement => {
            // Every wildlife regulation carries the base programme
            push("Establish a documented wildlife hazard management programme");
            push("Implement daily inspections before first operations");
            push("Keep a log of all wildlife sightings");
            if medium_up {
                push("Implement vegetation control");
                push("Remove food sources attractive to wildlife");
                push("Procure wildlife dispersal equipment");
            }
        }

        SafetyCategory::Maintenance => {
            if mentions(&["calibration"]) {
                push("Identify all critical equipment requiring calibration");
                push("Establish an annual calibration schedule");
                push("Keep calibration certificates current");
            }
            if mentions(&["preventive"]) {
                push("Develop a preventive maintenance programme");
                push("Keep detailed records of all maintenance performed");
                push("Establish a maintenance schedule");
            }
            if mentions(&["aeronautical maintenance", "hangar"]) {
                push("Ensure hangars hold current certification");
                push("Verify certification of maintenance equipment");
                push("Ensure qualified and certified maintenance personnel");
                push("Implement tool control");
            }
        }

        SafetyCategory::PersonnelCertification => {
            if mentions(&["supervisor"]) {
                push("Verify authority certification of supervisors");
                push("Guarantee recurrent certification every two years");
                push("Keep records of certifications and experience");
            }
            if mentions(&["training"]) {
                push("Develop a safety training programme");
                push("Guarantee initial training for all employees");
                push("Establish annual recurrent training");
                push("Keep training completion certificates");
            }
        }

        SafetyCategory::AirTrafficServices => {
            if mentions(&["tower", "control"]) {
                push("Verify control tower certification");
                push("Ensure ATC personnel are certified and current");
            }
            if mentions(&["navigation"]) {
                push("Verify certification of navigation aids (ILS, VOR)");
                push("Establish a navigation aid calibration schedule");
                push("Provide backup navigation systems");
            }
            if mentions(&["communication", "vhf"]) {
                push("Verify VHF communication system operation");
                push("Confirm frequency assignments with the authority");
                push("Provide a backup communication system");
                push("Establish daily readiness tests");
            }
        }
    }

    // Generic fallback so no applicable regulation ever yields an empty
    // checklist
    if items.is_empty() {
        items.push(format!(
            "Review the requirements of regulation {}",
            regulation.code
        ));
        items.push("Run an internal audit to verify conformity".to_string());
        items.push("Document evidence of conformity".to_string());
        items.push("Establish an implementation schedule where gaps exist".to_string());
    }

    items
}
