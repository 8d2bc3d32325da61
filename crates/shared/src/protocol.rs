use serde::{Deserialize, Serialize};

use crate::domain::Member;

/// Body of `GET /members`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MembersResponse {
    pub data: Vec<Member>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_members_envelope_in_order() {
        let body = r#"{
            "data": [
                {"id":"a","name":"Ann","role":"Lead","location":"NY","bio":"loves Go","skills":["Go"],"photo":"https://img/a.png"},
                {"id":"b","name":"Ben","role":"Dev","location":"SF","bio":"","skills":["Rust"]}
            ]
        }"#;
        let decoded: MembersResponse = serde_json::from_str(body).expect("decode");
        let names: Vec<_> = decoded.data.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["Ann", "Ben"]);
        assert_eq!(decoded.data[0].photo.as_deref(), Some("https://img/a.png"));
    }

    #[test]
    fn rejects_body_without_data_field() {
        assert!(serde_json::from_str::<MembersResponse>(r#"{"members":[]}"#).is_err());
    }
}
