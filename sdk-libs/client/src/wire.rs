//! Wire parsing for transactions returned by the registration backend.
//!
//! The backend returns partially signed versioned transactions as raw
//! bytes: a compact-u16 ("shortvec") count, that many 64-byte signatures,
//! then the bincode-encoded message. The signature array is parsed by hand
//! so already-present co-signatures survive the round trip to the wallet.

use solana_sdk::{
    message::VersionedMessage, signature::Signature, transaction::VersionedTransaction,
};

use crate::errors::ClientError;

const SIGNATURE_BYTES: usize = 64;

/// Decodes a compact-u16 length prefix, returning the value and the number
/// of bytes it occupied.
pub fn decode_shortvec_len(bytes: &[u8]) -> Result<(usize, usize), ClientError> {
    let mut value = 0usize;
    let mut size = 0usize;
    loop {
        let byte = *bytes
            .get(size)
            .ok_or_else(|| ClientError::Wire("truncated length prefix".to_string()))?;
        value |= ((byte & 0x7f) as usize) << (size * 7);
        size += 1;
        if byte & 0x80 == 0 {
            break;
        }
        if size == 3 {
            return Err(ClientError::Wire("length prefix too long".to_string()));
        }
    }
    Ok((value, size))
}

pub fn deserialize_versioned_transaction(
    bytes: &[u8],
) -> Result<VersionedTransaction, ClientError> {
    let (count, prefix_len) = decode_shortvec_len(bytes)?;
    let signatures_end = prefix_len + count * SIGNATURE_BYTES;
    if bytes.len() < signatures_end {
        return Err(ClientError::Wire(format!(
            "expected {count} signatures, got {} bytes",
            bytes.len() - prefix_len
        )));
    }

    let signatures = bytes[prefix_len..signatures_end]
        .chunks(SIGNATURE_BYTES)
        .map(|chunk| {
            Signature::try_from(chunk)
                .map_err(|_| ClientError::Wire("invalid signature bytes".to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let message: VersionedMessage = bincode::deserialize(&bytes[signatures_end..])
        .map_err(|e| ClientError::Wire(format!("invalid message: {e}")))?;

    Ok(VersionedTransaction {
        signatures,
        message,
    })
}

#[cfg(test)]
mod test {
    use solana_sdk::{
        hash::Hash,
        message::v0,
        pubkey::Pubkey,
        signature::Keypair,
        signer::Signer,
        system_instruction,
    };

    use super::*;

    #[test]
    fn shortvec_single_byte_lengths() {
        assert_eq!(decode_shortvec_len(&[0]).unwrap(), (0, 1));
        assert_eq!(decode_shortvec_len(&[5, 0xff]).unwrap(), (5, 1));
        assert_eq!(decode_shortvec_len(&[0x7f]).unwrap(), (127, 1));
    }

    #[test]
    fn shortvec_multi_byte_lengths() {
        assert_eq!(decode_shortvec_len(&[0x80, 0x01]).unwrap(), (128, 2));
        assert_eq!(decode_shortvec_len(&[0xff, 0x01]).unwrap(), (255, 2));
    }

    #[test]
    fn truncated_prefix_fails() {
        assert!(decode_shortvec_len(&[]).is_err());
        assert!(decode_shortvec_len(&[0x80]).is_err());
    }

    #[test]
    fn backend_transaction_round_trips() {
        let payer = Keypair::new();
        let instruction =
            system_instruction::transfer(&payer.pubkey(), &Pubkey::new_unique(), 100);
        let message = v0::Message::try_compile(
            &payer.pubkey(),
            &[instruction],
            &[],
            Hash::new_unique(),
        )
        .unwrap();
        let transaction = VersionedTransaction::try_new(
            solana_sdk::message::VersionedMessage::V0(message),
            &[&payer],
        )
        .unwrap();

        let bytes = bincode::serialize(&transaction).unwrap();
        let parsed = deserialize_versioned_transaction(&bytes).unwrap();
        assert_eq!(parsed, transaction);
    }

    #[test]
    fn signature_count_mismatch_fails() {
        // Claims two signatures but carries none.
        let err = deserialize_versioned_transaction(&[2, 0, 0]).unwrap_err();
        assert!(matches!(err, ClientError::Wire(_)));
    }
}
