//! AUTN/AUTS token assembly and parsing.
//!
//! AUTN (16 bytes) is sent to the USIM as `(SQN ⊕ AK) || AMF || MAC-A`. AUTS (14 bytes) is the
//! USIM's resynchronization token, `(SQN_MS ⊕ AK*) || MAC-S`. Both are pure positional encodings;
//! neither function performs any cryptography of its own.

/// The 16-byte AUTN token sent to the USIM: `(SQN ⊕ AK) || AMF || MAC-A`.
pub type Autn = [u8; 16];

/// The 14-byte AUTS token received from the USIM on resynchronization.
pub type Auts = [u8; 14];

/// Builds an AUTN token from its four positional fields.
pub fn build_autn(sqn: &[u8; 6], ak: &[u8; 6], amf: &[u8; 2], mac_a: &[u8; 8]) -> Autn {
    let mut autn = [0u8; 16];

    for i in 0..6 {
        autn[i] = sqn[i] ^ ak[i];
    }

    autn[6..8].copy_from_slice(amf);
    autn[8..16].copy_from_slice(mac_a);

    autn
}

/// Splits an AUTS token into its `SQN_MS ⊕ AK*` field and its MAC-S field.
pub fn parse_auts(auts: &Auts) -> ([u8; 6], [u8; 8]) {
    let mut sqn_xor_ak_star = [0u8; 6];
    sqn_xor_ak_star.copy_from_slice(&auts[0..6]);

    let mut mac_s = [0u8; 8];
    mac_s.copy_from_slice(&auts[6..14]);

    (sqn_xor_ak_star, mac_s)
}

/// Builds an AUTS token from its two positional fields, the mirror of [`parse_auts`].
///
/// Not used by the HE/AuC core itself (the USIM builds AUTS, not the network) but provided so
/// tests can construct realistic AUTS tokens without hand-assembling byte arrays.
pub fn build_auts(sqn_ms_xor_ak_star: &[u8; 6], mac_s: &[u8; 8]) -> Auts {
    let mut auts = [0u8; 14];
    auts[0..6].copy_from_slice(sqn_ms_xor_ak_star);
    auts[6..14].copy_from_slice(mac_s);
    auts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_and_parse_autn_roundtrips_amf() {
        let sqn = [0x00, 0x00, 0x00, 0x00, 0x00, 0x40];
        let ak = [0x11, 0x22, 0x33, 0x44, 0x55, 0x66];
        let amf = [0x80, 0x00];
        let mac_a = [0xaa; 8];

        let autn = build_autn(&sqn, &ak, &amf, &mac_a);

        assert_eq!(&autn[6..8], &amf);
        assert_eq!(&autn[8..16], &mac_a);

        let mut recovered_sqn = [0u8; 6];
        for i in 0..6 {
            recovered_sqn[i] = autn[i] ^ ak[i];
        }
        assert_eq!(recovered_sqn, sqn);
    }

    #[test]
    fn build_and_parse_auts_roundtrip() {
        let sqn_xor = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06];
        let mac_s = [0x99; 8];

        let auts = build_auts(&sqn_xor, &mac_s);
        let (parsed_sqn_xor, parsed_mac_s) = parse_auts(&auts);

        assert_eq!(parsed_sqn_xor, sqn_xor);
        assert_eq!(parsed_mac_s, mac_s);
    }
}
