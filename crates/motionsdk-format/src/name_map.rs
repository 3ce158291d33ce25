use std::collections::BTreeMap;

const NODE_OPEN: &str = "<node id=\"";
const KEY_ATTR: &str = "\" key=\"";

/// Extract the device key to name list the service sends before streaming.
///
/// Scans for `<node id="NAME" key="KEY"` entries in document order. The first
/// entry for a key wins. Entries with an empty name or a non-numeric key are
/// ignored.
pub fn parse_name_map(xml: &str) -> BTreeMap<u32, String> {
    let mut map = BTreeMap::new();
    let mut rest = xml;

    while let Some(start) = rest.find(NODE_OPEN) {
        rest = &rest[start + NODE_OPEN.len()..];
        if let Some((key, name)) = parse_node(rest) {
            map.entry(key).or_insert_with(|| name.to_string());
        }
    }

    map
}

fn parse_node(src: &str) -> Option<(u32, &str)> {
    let name_end = src.find('"')?;
    let name = &src[..name_end];
    if name.is_empty() {
        return None;
    }

    let after = src[name_end..].strip_prefix(KEY_ATTR)?;
    let digits = after.find('"')?;
    let key = &after[..digits];
    if key.is_empty() || !key.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    Some((key.parse().ok()?, name))
}
