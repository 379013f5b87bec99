// file: src/library/seed.rs
// description: fixed startup set of protocol note documents

use crate::models::NoteFile;

/// The protocol notes every session starts with. Content is the extracted
/// text of the NC OEMS class protocols the assistant was built around.
pub fn seed_protocols() -> Vec<NoteFile> {
    vec![
        NoteFile::seeded(
            "pc2",
            "PC 2: Pediatric Bradycardia",
            "154 KB",
            "2025-05-20",
            "HISTORY: Past medical history, Foreign body exposure, Respiratory distress or arrest, Apnea, Possible toxic or poison exposure, Congenital disease, Medication (maternal or infant).\n\
SIGNS AND SYMPTOMS: Decreased heart rate, Delayed capillary refill or cyanosis, Mottled, cool skin, Hypotension or arrest, Altered level of consciousness.\n\
DIFFERENTIAL: Respiratory failure, Foreign body, Secretions, Infection (croup, epiglotitis), Hypovolemia (dehydration), Congenital heart disease, Trauma, Tension pneumothorax, Hypothermia, Toxin or medication, Hypoglycemia, Acidosis.\n\
PROTOCOL: Typically HR < 60/min. Identify underlying cause. Search for reversible causes. \n\
REVERSIBLE CAUSES: Hypovolemia, Hypoxia, Hydrogen ion (acidosis), Hypothermia, Hypo/Hyperkalemia, Hypoglycemia, Tension pneumothorax, Tamponade (cardiac), Toxins, Thrombosis (pulmonary PE or coronary MI).\n\
PEARLS: Bradycardia is often associated with hypoxia so ensure patent airway, breathing, and circulation as needed. Begin CPR immediately with persistent bradycardia and poor perfusion despite adequate oxygenation and ventilation.",
        ),
        NoteFile::seeded(
            "te1",
            "TE 1: Bites and Envenomations",
            "128 KB",
            "2025-05-20",
            "HISTORY: Type of bite/sting, Description/photo, Time, location, size, Previous reaction, Domestic vs. Wild, Tetanus and Rabies risk.\n\
SIGNS AND SYMPTOMS: Rash, skin break, wound, Pain, soft tissue swelling, redness, Blood oozing, Evidence of infection, Shortness of breath, wheezing, Allergic reaction, hives, itching, Hypotension or shock.\n\
DIFFERENTIAL: Animal bite, Human bite, Snake bite (poisonous), Spider bite (poisonous), Insect sting/bite, Infection risk, Rabies risk, Tetanus risk.\n\
SNAKE BITE PEARLS: Poisonous snakes in NC are generally pit vipers (rattlesnake and copperhead). Coral snakes are rare (Red on yellow - kill a fellow). Do not attempt to identify the snake if it endangers providers. Do not apply ice.\n\
SPIDER BITE PEARLS: Black Widow: muscular pain and severe abdominal pain. Brown Recluse: tissue necrosis develops over next few days.",
        ),
        NoteFile::seeded(
            "up7",
            "UP 7: Dental Problems",
            "92 KB",
            "2025-05-20",
            "SIGNS AND SYMPTOMS: Bleeding, Pain, Fever, Swelling, Tooth missing or fractured.\n\
DIFFERENTIAL: Decay, Infection, Fracture, Avulsion, Abscess, Facial cellulitis, Impacted tooth, TMJ syndrome, Myocardial infarction.\n\
AVULSED TOOTH PEARLS: Handle tooth by crown, do not touch root. Rinse if soiled but do not scrub (damages ligaments). Reimplantation is possible within 4 hours if properly cared for, unlikely after 1 hour. Transport tooth in Milk, Commercial solution, Saliva, or IV solution.\n\
BLEEDING: Control with direct pressure using gauze in socket with patient closing teeth to exert pressure.",
        ),
        NoteFile::seeded(
            "up6",
            "UP 6: IV or IO Access",
            "110 KB",
            "2025-05-20",
            "INDICATIONS: Chronic medical conditions, ESRD/Hemodialysis, Chronic IV nutrition.\n\
DEVICES: Port-a-cath (surgically implanted beneath skin), Dialysis Catheter (RED port indicates use for dialysis), PICC Line, Central Line.\n\
PEARLS: Central line catheters placed for chemo, meds, electrolytes, antibiotics, and blood are available to EMS. \n\
DIALYSIS RESTRICTION: Central line catheters placed for hemodialysis are NOT available for access by EMS unless the patient is in cardiac arrest.\n\
CLEANING: When accessing central catheter, ensure sterility by cleaning port with alcohol 2-3 times prior to access.",
        ),
        NoteFile::seeded(
            "up15",
            "UP 15: Suspected Sepsis",
            "142 KB",
            "2025-05-20",
            "ADULT SIRS CRITERIA: Temp >= 100.4F (38C) or <= 96.8F (36C) AND any 1 of: HR > 90, RR > 20, EtCO2 < 25 mmHg.\n\
ADULT qSOFA CRITERIA: SBP <= 100 mmHg, RR >= 22, AMS or new mental status change.\n\
PEDIATRIC SIRS CRITERIA: Heart Rate 1mo-1yr > 180, 2-5yr > 140, 6-12yr > 130, 13-18yr > 120.\n\
PEARLS: Sepsis is a life-threatening condition where the body's immune response to infection injures its own tissues and organs. Abnormally low temperatures increase mortality, often found in geriatric patients.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_seed_set_shape() {
        let docs = seed_protocols();
        assert_eq!(docs.len(), 5);

        let ids: HashSet<_> = docs.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids.len(), docs.len());
    }

    #[test]
    fn test_seed_order_is_stable() {
        let docs = seed_protocols();
        assert_eq!(docs[0].id, "pc2");
        assert_eq!(docs[4].name, "UP 15: Suspected Sepsis");
    }

    #[test]
    fn test_seed_slugs() {
        let slugs: Vec<String> = seed_protocols().iter().map(|d| d.slug()).collect();
        assert_eq!(slugs, vec!["pc 2", "te 1", "up 7", "up 6", "up 15"]);
    }
}
