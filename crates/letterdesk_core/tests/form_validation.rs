use letterdesk_core::{CleanedRecord, Field, Flow, FormRecord, REFERENCE_SLOTS};
use pretty_assertions::assert_eq;
use serde_json::json;

fn cover_letter(values: [&str; 4]) -> FormRecord {
    FormRecord::empty(Flow::CoverLetter)
        .with_field(Field::JobDescription, values[0])
        .with_field(Field::ApplicantName, values[1])
        .with_field(Field::Position, values[2])
        .with_field(Field::CompanyName, values[3])
}

fn proposal(values: [&str; 6]) -> FormRecord {
    FormRecord::empty(Flow::Proposal)
        .with_field(Field::FirstName, values[0])
        .with_field(Field::LastName, values[1])
        .with_field(Field::Email, values[2])
        .with_field(Field::CompanyName, values[3])
        .with_field(Field::CallLink, values[4])
        .with_field(Field::JobDescription, values[5])
}

#[test]
fn cover_letter_requires_every_field_for_all_combinations() {
    let filled = ["Rust role", "Ada", "Engineer", "Acme"];
    for mask in 0u8..16 {
        let mut values = ["  "; 4];
        for (bit, value) in filled.iter().enumerate() {
            if mask & (1 << bit) != 0 {
                values[bit] = *value;
            }
        }
        let record = cover_letter(values);
        assert_eq!(record.is_submittable(), mask == 0b1111, "mask {mask:04b}");
    }
}

#[test]
fn proposal_requires_names_email_company_and_one_source() {
    let required = ["Ada", "Lovelace", "ada@example.com", "Acme"];
    for mask in 0u8..64 {
        let mut values = [""; 6];
        for bit in 0..4 {
            if mask & (1 << bit) != 0 {
                values[bit] = required[bit];
            }
        }
        if mask & (1 << 4) != 0 {
            values[4] = "https://calls.example.com/rec.mp3";
        }
        if mask & (1 << 5) != 0 {
            values[5] = "Build a data pipeline";
        }
        let required_ok = mask & 0b1111 == 0b1111;
        let source_ok = mask & 0b11_0000 != 0;
        assert_eq!(
            proposal(values).is_submittable(),
            required_ok && source_ok,
            "mask {mask:06b}"
        );
    }
}

#[test]
fn whitespace_only_optional_source_does_not_count() {
    let record = proposal(["Ada", "Lovelace", "ada@example.com", "Acme", "   ", "\n\t"]);
    assert!(!record.is_submittable());
}

#[test]
fn blank_references_are_dropped_from_cleaned_record() {
    let mut form = match cover_letter(["jd", "Ada", "Engineer", "Acme"]) {
        FormRecord::CoverLetter(form) => form,
        FormRecord::Proposal(_) => unreachable!(),
    };
    form.references = vec!["".into(), "https://x.com".into(), "".into()];

    let cleaned = FormRecord::CoverLetter(form).cleaned();
    match cleaned {
        CleanedRecord::CoverLetter(request) => {
            assert_eq!(request.references, vec!["https://x.com".to_string()]);
        }
        CleanedRecord::Proposal(_) => panic!("wrong flow"),
    }
}

#[test]
fn reference_slots_are_fixed() {
    let record = FormRecord::empty(Flow::CoverLetter)
        .with_field(Field::Reference(1), "https://linkedin.com/in/ada")
        .with_field(Field::Reference(REFERENCE_SLOTS), "https://ignored.example.com");

    let FormRecord::CoverLetter(form) = &record else {
        panic!("wrong flow");
    };
    assert_eq!(form.references.len(), REFERENCE_SLOTS);
    assert_eq!(record.value(Field::Reference(0)), Some(""));
    assert_eq!(
        record.value(Field::Reference(1)),
        Some("https://linkedin.com/in/ada")
    );
    assert_eq!(record.value(Field::Reference(REFERENCE_SLOTS)), None);
}

#[test]
fn foreign_fields_leave_record_untouched() {
    let before = FormRecord::empty(Flow::Proposal);
    let after = before.clone().with_field(Field::Position, "Engineer");
    assert_eq!(before, after);
}

#[test]
fn cover_letter_payload_uses_wire_names_and_keeps_values_verbatim() {
    let record = cover_letter([" jd ", "Ada", "Engineer", "Acme"])
        .with_field(Field::Reference(0), "https://a.example.com");
    let body = serde_json::to_value(record.cleaned()).unwrap();
    assert_eq!(
        body,
        json!({
            "jobDescription": " jd ",
            "applicantName": "Ada",
            "position": "Engineer",
            "companyName": "Acme",
            "references": ["https://a.example.com"],
        })
    );
}

#[test]
fn proposal_payload_omits_blank_optional_fields() {
    let record = proposal(["Ada", "Lovelace", "ada@example.com", "Acme", " ", "Data work"]);
    let body = serde_json::to_value(record.cleaned()).unwrap();
    assert_eq!(
        body,
        json!({
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "ada@example.com",
            "companyName": "Acme",
            "jobDescription": "Data work",
        })
    );
}
