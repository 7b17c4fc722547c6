use super::DecodeChannel;

/// A [`DecodeChannel`] over an already-parsed `serde_json::Value`.
///
/// JSON numbers are ambiguous: `1` answers both the integer and the float
/// probe, and the probe order decides.
#[derive(Debug, Clone, Copy)]
pub struct JsonChannel<'a> {
    value: &'a serde_json::Value,
}

impl<'a> JsonChannel<'a> {
    pub fn new(value: &'a serde_json::Value) -> Self {
        Self { value }
    }
}

impl<'a> DecodeChannel for JsonChannel<'a> {
    fn decode_nil(&self) -> bool {
        self.value.is_null()
    }

    fn decode_i64(&self) -> Option<i64> {
        self.value.as_i64()
    }

    fn decode_f64(&self) -> Option<f64> {
        self.value.as_f64()
    }

    fn decode_bool(&self) -> Option<bool> {
        self.value.as_bool()
    }

    fn decode_string(&self) -> Option<String> {
        self.value.as_str().map(str::to_string)
    }

    fn decode_seq(&self) -> Option<Vec<Self>> {
        self.value
            .as_array()
            .map(|items| items.iter().map(JsonChannel::new).collect())
    }

    fn decode_map(&self) -> Option<Vec<(String, Self)>> {
        self.value
            .as_object()
            .map(|map| map.iter().map(|(k, v)| (k.clone(), JsonChannel::new(v))).collect())
    }
}
