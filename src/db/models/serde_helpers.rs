//! Serde helpers for ObjectId fields
//!
//! Documents keep native `ObjectId` values in MongoDB while the JSON
//! representation exposes them as 24-hex strings. Deserialization
//! accepts either form so models round-trip through both BSON and JSON.

pub mod option_object_id {
    use bson::oid::ObjectId;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<ObjectId>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(oid) => serializer.serialize_str(&oid.to_hex()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<ObjectId>, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Oid(ObjectId),
            Hex(String),
        }

        match Option::<Repr>::deserialize(deserializer)? {
            None => Ok(None),
            Some(Repr::Oid(oid)) => Ok(Some(oid)),
            Some(Repr::Hex(s)) => ObjectId::parse_str(&s)
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use bson::oid::ObjectId;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize)]
    struct Doc {
        #[serde(
            rename = "_id",
            default,
            skip_serializing_if = "Option::is_none",
            with = "super::option_object_id"
        )]
        id: Option<ObjectId>,
        name: String,
    }

    #[test]
    fn test_serializes_as_hex_string() {
        let oid = ObjectId::parse_str("65f0a1b2c3d4e5f6a7b8c9d0").unwrap();
        let doc = Doc {
            id: Some(oid),
            name: "widget".into(),
        };
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["_id"], "65f0a1b2c3d4e5f6a7b8c9d0");
    }

    #[test]
    fn test_none_id_is_omitted() {
        let doc = Doc {
            id: None,
            name: "widget".into(),
        };
        let json = serde_json::to_value(&doc).unwrap();
        assert!(json.get("_id").is_none());
    }

    #[test]
    fn test_deserializes_from_hex_string() {
        let doc: Doc =
            serde_json::from_str(r#"{"_id": "65f0a1b2c3d4e5f6a7b8c9d0", "name": "widget"}"#)
                .unwrap();
        assert_eq!(doc.id.unwrap().to_hex(), "65f0a1b2c3d4e5f6a7b8c9d0");
    }

    #[test]
    fn test_deserializes_from_missing_id() {
        let doc: Doc = serde_json::from_str(r#"{"name": "widget"}"#).unwrap();
        assert!(doc.id.is_none());
    }

    #[test]
    fn test_rejects_malformed_hex() {
        let result: Result<Doc, _> =
            serde_json::from_str(r#"{"_id": "not-an-object-id", "name": "widget"}"#);
        assert!(result.is_err());
    }
}
