use linked_hash_map::LinkedHashMap;

/// INFO key to value tokens, in the order the keys were read. An empty token
/// list is a flag.
pub type InfoMap = LinkedHashMap<String, Vec<String>>;

/// Decodes a raw INFO column, e.g. `MQ=1;CNT=5,8;DB`.
///
/// A repeated key keeps its first position but takes the last value.
pub fn decode_info(raw: &str) -> InfoMap {
    let mut info = InfoMap::new();
    for entry in raw.split(';') {
        let (key, values) = match entry.split_once('=') {
            Some((key, value)) => (key, value.split(',').map(str::to_string).collect()),
            None => (entry, Vec::new()),
        };
        match info.get_mut(key) {
            Some(existing) => *existing = values,
            None => {
                info.insert(key.to_string(), values);
            }
        }
    }
    info
}

/// Encodes an INFO map back into its column form.
pub fn encode_info(info: &InfoMap) -> String {
    info.iter()
        .map(|(key, values)| {
            if values.is_empty() {
                key.clone()
            } else {
                format!("{}={}", key, values.join(","))
            }
        })
        .collect::<Vec<_>>()
        .join(";")
}
