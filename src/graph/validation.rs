//! Boundary validation for untrusted records.
//!
//! Everything arriving from the indexer or a config file passes through one
//! of these predicates before the rest of the application trusts it. They
//! answer "is it safe to proceed" and nothing more: no repair, no partial
//! extraction, no logging. Malformed input, including null, yields `false`
//! rather than an error, so callers branch instead of catching.

use serde_json::Value;

/// Allowed `status` values for a plain transaction.
const TX_STATUSES: [&str; 3] = ["success", "pending", "failed"];

/// Allowed `status` values for a cross-chain transfer.
const CROSS_CHAIN_STATUSES: [&str; 3] = ["pending", "completed", "failed"];

fn field<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    value.as_object().and_then(|map| map.get(key))
}

fn has_string(value: &Value, key: &str) -> bool {
    field(value, key).is_some_and(Value::is_string)
}

fn has_number(value: &Value, key: &str) -> bool {
    field(value, key).is_some_and(Value::is_number)
}

fn has_status(value: &Value, allowed: &[&str]) -> bool {
    field(value, "status")
        .and_then(Value::as_str)
        .is_some_and(|status| allowed.contains(&status))
}

/// Checks that a value has the exact shape of a transaction record.
///
/// Every field is mandatory and type-exact; `status` must come from the
/// closed set. Monetary and gas fields are decimal strings on the wire, not
/// numbers.
pub fn is_valid_transaction(value: &Value) -> bool {
    has_string(value, "txHash")
        && has_number(value, "blockNumber")
        && has_number(value, "timestamp")
        && has_string(value, "from")
        && has_string(value, "to")
        && has_string(value, "value")
        && has_string(value, "gasUsed")
        && has_string(value, "gasPrice")
        && has_status(value, &TX_STATUSES)
        && has_number(value, "chainId")
}

/// Checks that a value has the shape of a cross-chain transfer record.
///
/// The two chain descriptors must be JSON objects; their inner shape is
/// bridge-specific and not checked here. Messages only need to be a
/// sequence.
pub fn is_valid_cross_chain_transaction(value: &Value) -> bool {
    has_string(value, "txHash")
        && field(value, "sourceChain").is_some_and(Value::is_object)
        && field(value, "destinationChain").is_some_and(Value::is_object)
        && field(value, "crossChainMessages").is_some_and(Value::is_array)
        && has_status(value, &CROSS_CHAIN_STATUSES)
        && has_number(value, "timestamp")
}

/// Checks that a value can be handed to the rendering engine as a dataset.
///
/// Only the container shape is enforced; node and edge element shape is the
/// engine's responsibility.
pub fn is_valid_graph_data(value: &Value) -> bool {
    field(value, "nodes").is_some_and(Value::is_array)
        && field(value, "edges").is_some_and(Value::is_array)
}

/// Checks that a value is a usable mainnet/testnet endpoint configuration.
pub fn is_valid_network_config(value: &Value) -> bool {
    [field(value, "mainnet"), field(value, "testnet")]
        .into_iter()
        .all(|network| {
            network.is_some_and(|net| has_string(net, "rpcUrl") && has_number(net, "chainId"))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn sample_tx() -> Value {
        json!({
            "txHash": "0xabc",
            "blockNumber": 1,
            "timestamp": 1_700_000_000,
            "from": "0x1",
            "to": "0x2",
            "value": "1",
            "gasUsed": "21000",
            "gasPrice": "1",
            "status": "success",
            "chainId": 7000,
        })
    }

    fn sample_cross_chain() -> Value {
        json!({
            "txHash": "0xdef",
            "sourceChain": {"name": "zetachain"},
            "destinationChain": {"name": "ethereum"},
            "crossChainMessages": [],
            "status": "pending",
            "timestamp": 1_700_000_000,
        })
    }

    #[test]
    fn well_formed_transaction_passes() {
        assert!(is_valid_transaction(&sample_tx()));
    }

    #[test]
    fn every_tx_status_variant_passes() {
        for status in ["success", "pending", "failed"] {
            let mut tx = sample_tx();
            tx["status"] = json!(status);
            assert!(is_valid_transaction(&tx), "status {status} should pass");
        }
    }

    #[test]
    fn unknown_tx_status_fails() {
        let mut tx = sample_tx();
        tx["status"] = json!("cancelled");
        assert!(!is_valid_transaction(&tx));
    }

    #[test]
    fn missing_tx_field_fails() {
        for key in [
            "txHash", "blockNumber", "timestamp", "from", "to", "value", "gasUsed",
            "gasPrice", "status", "chainId",
        ] {
            let mut tx = sample_tx();
            tx.as_object_mut().unwrap().remove(key);
            assert!(!is_valid_transaction(&tx), "missing {key} should fail");
        }
    }

    #[test]
    fn mistyped_tx_field_fails() {
        // Numeric where a string is required.
        let mut tx = sample_tx();
        tx["value"] = json!(1);
        assert!(!is_valid_transaction(&tx));

        // String where a number is required.
        let mut tx = sample_tx();
        tx["blockNumber"] = json!("1");
        assert!(!is_valid_transaction(&tx));

        let mut tx = sample_tx();
        tx["chainId"] = json!(null);
        assert!(!is_valid_transaction(&tx));
    }

    #[test]
    fn non_object_input_fails() {
        assert!(!is_valid_transaction(&Value::Null));
        assert!(!is_valid_transaction(&json!([])));
        assert!(!is_valid_transaction(&json!("0xabc")));
        assert!(!is_valid_cross_chain_transaction(&Value::Null));
        assert!(!is_valid_graph_data(&Value::Null));
        assert!(!is_valid_network_config(&Value::Null));
    }

    #[test]
    fn well_formed_cross_chain_passes() {
        assert!(is_valid_cross_chain_transaction(&sample_cross_chain()));
    }

    #[test]
    fn cross_chain_requires_object_chain_descriptors() {
        let mut record = sample_cross_chain();
        record["sourceChain"] = Value::Null;
        assert!(!is_valid_cross_chain_transaction(&record));

        let mut record = sample_cross_chain();
        record["destinationChain"] = json!("ethereum");
        assert!(!is_valid_cross_chain_transaction(&record));
    }

    #[test]
    fn cross_chain_requires_message_sequence() {
        let mut record = sample_cross_chain();
        record["crossChainMessages"] = json!({});
        assert!(!is_valid_cross_chain_transaction(&record));
    }

    #[test]
    fn cross_chain_status_set_differs_from_tx() {
        // "completed" is valid here but not for plain transactions.
        let mut record = sample_cross_chain();
        record["status"] = json!("completed");
        assert!(is_valid_cross_chain_transaction(&record));

        record["status"] = json!("success");
        assert!(!is_valid_cross_chain_transaction(&record));
    }

    #[test]
    fn graph_data_requires_both_sequences() {
        assert!(is_valid_graph_data(&json!({"nodes": [], "edges": []})));
        assert!(!is_valid_graph_data(&json!({"nodes": []})));
        assert!(!is_valid_graph_data(&json!({"edges": []})));
        assert!(!is_valid_graph_data(&json!({"nodes": {}, "edges": []})));
    }

    #[test]
    fn graph_data_does_not_inspect_elements() {
        // Element shape is deferred to the rendering engine.
        let data = json!({"nodes": [1, "two", null], "edges": [{}]});
        assert!(is_valid_graph_data(&data));
    }

    #[test]
    fn network_config_requires_both_networks() {
        let config = json!({
            "mainnet": {"rpcUrl": "https://rpc.example", "chainId": 7000},
            "testnet": {"rpcUrl": "https://rpc.test.example", "chainId": 7001},
        });
        assert!(is_valid_network_config(&config));

        let mut missing = config.clone();
        missing.as_object_mut().unwrap().remove("testnet");
        assert!(!is_valid_network_config(&missing));

        let mut bad_url = config.clone();
        bad_url["mainnet"]["rpcUrl"] = json!(42);
        assert!(!is_valid_network_config(&bad_url));

        let mut bad_chain = config;
        bad_chain["testnet"]["chainId"] = json!("7001");
        assert!(!is_valid_network_config(&bad_chain));
    }
}
