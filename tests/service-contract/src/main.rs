fn main() {
    println!("Run `cargo test -p service-contract` to check the service wire fixtures.");
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use moodlens_protocol::{
        DetectionResult, EmojiCatalog, Emotion, ImageRef, ServiceFailure, WireCatalog, WireEmoji,
    };

    /// Returns the path to the fixtures directory.
    fn fixtures_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
    }

    fn load_bytes(name: &str) -> Vec<u8> {
        let path = fixtures_dir().join(name);
        fs::read(&path).unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()))
    }

    /// Loads a fixture JSON file and returns it as a `serde_json::Value`.
    fn load_fixture(name: &str) -> serde_json::Value {
        serde_json::from_slice(&load_bytes(name))
            .unwrap_or_else(|e| panic!("failed to parse fixture {name}: {e}"))
    }

    /// Normalizes numbers so that `0` and `0.0` compare equal.
    fn normalize_value(v: &serde_json::Value) -> serde_json::Value {
        match v {
            serde_json::Value::Number(n) => match n.as_f64() {
                Some(f) => serde_json::json!(f),
                None => v.clone(),
            },
            serde_json::Value::Object(map) => serde_json::Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), normalize_value(v)))
                    .collect(),
            ),
            serde_json::Value::Array(arr) => {
                serde_json::Value::Array(arr.iter().map(normalize_value).collect())
            }
            _ => v.clone(),
        }
    }

    /// Deserializes a fixture, re-serializes it and compares the JSON values.
    fn roundtrip_test<T>(name: &str) -> T
    where
        T: serde::de::DeserializeOwned + serde::Serialize,
    {
        let fixture = load_fixture(name);
        let parsed: T = serde_json::from_value(fixture.clone())
            .unwrap_or_else(|e| panic!("failed to deserialize {name}: {e}"));
        let reserialized = serde_json::to_value(&parsed)
            .unwrap_or_else(|e| panic!("failed to re-serialize {name}: {e}"));

        assert_eq!(
            normalize_value(&fixture),
            normalize_value(&reserialized),
            "roundtrip mismatch for {name}:\n  service: {fixture}\n  client:  {reserialized}"
        );
        parsed
    }

    fn failure(name: &str) -> ServiceFailure {
        ServiceFailure::from_body(&load_bytes(name))
            .unwrap_or_else(|| panic!("{name} not recognised as a failure body"))
    }

    // --- POST /upload ---

    #[test]
    fn fixture_detection_success() {
        let result: DetectionResult = roundtrip_test("detection_success.json");
        assert_eq!(result.emotion, Emotion::Happy);
        assert_eq!(result.probability(Emotion::Happy), 0.9);
        assert_eq!(result.probabilities.len(), 7);
        assert!(result.human_mask_image.is_some());
        assert!(matches!(
            ImageRef::parse(&result.processed_image),
            Ok(ImageRef::Inline { .. })
        ));
    }

    #[test]
    fn fixture_detection_without_mask() {
        let result: DetectionResult = roundtrip_test("detection_without_mask.json");
        assert_eq!(result.emotion, Emotion::Sad);
        assert!(result.human_mask_image.is_none());
        assert_eq!(result.probability(Emotion::Angry), 0.0);
        assert!(matches!(
            ImageRef::parse(&result.processed_image),
            Ok(ImageRef::Remote(_))
        ));
    }

    // --- Failure bodies ---

    #[test]
    fn fixture_error_message() {
        let f = failure("error_message.json");
        assert!(matches!(f, ServiceFailure::Message { .. }));
        assert_eq!(f.display_message(), Some("No face detected in the image"));
    }

    #[test]
    fn fixture_error_detail_text() {
        let f = failure("error_detail_text.json");
        assert_eq!(f.display_message(), Some("Invalid emotion category"));
    }

    #[test]
    fn fixture_error_detail_array() {
        let f = failure("error_detail_array.json");
        let ServiceFailure::FieldErrors { errors } = &f else {
            panic!("expected field errors, got {f:?}");
        };
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].kind.as_deref(), Some("value_error.missing"));
        assert_eq!(f.display_message(), Some("field required"));
    }

    #[test]
    fn fixture_error_field_array() {
        let f = failure("error_field_array.json");
        assert_eq!(f.display_message(), Some("x"));
    }

    #[test]
    fn success_bodies_are_not_failures() {
        assert!(ServiceFailure::from_body(&load_bytes("detection_success.json")).is_none());
    }

    // --- GET /admin/emotions ---

    #[test]
    fn fixture_catalog_wire_roundtrip() {
        let wire: WireCatalog = roundtrip_test("catalog.json");
        assert!(matches!(wire["sad"][0], WireEmoji::Path(_)));
    }

    #[test]
    fn fixture_catalog_domain() {
        let wire: WireCatalog = serde_json::from_value(load_fixture("catalog.json")).unwrap();
        let catalog = EmojiCatalog::from_wire(wire);

        // "joy" is not a known label.
        assert_eq!(catalog.asset_count(), 4);
        let labels: Vec<Emotion> = catalog
            .iter()
            .filter(|(_, assets)| !assets.is_empty())
            .map(|(e, _)| e)
            .collect();
        assert_eq!(labels, vec![Emotion::Angry, Emotion::Happy, Emotion::Sad]);

        let happy: Vec<&str> = catalog
            .get(Emotion::Happy)
            .iter()
            .map(|a| a.name.as_str())
            .collect();
        assert_eq!(happy, vec!["grin.png", "smile.png"]);

        let tear = &catalog.get(Emotion::Sad)[0];
        assert_eq!(tear.name, "tear.png");
        assert!(tear.data_url().is_none());
        assert_eq!(
            catalog.get(Emotion::Angry)[0].data_url().as_deref(),
            Some("data:image/png;base64,iVBORw0KGgo=")
        );
    }
}
