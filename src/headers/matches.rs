/// Field name characters.
///
/// token   = 1*tchar
/// tchar   = "!" / "#" / "$" / "%" / "&" / "*"
///         / "+" / "-" / "." / "^" / "_" / "`" / "|" / "~"
///         / DIGIT / ALPHA
const TOKEN: [bool; 256] = {
    let mut bytes = [false; 256];
    let mut byte = 0u8;
    loop {
        bytes[byte as usize] = matches!(
            byte,
            | b'!' | b'#' | b'$' | b'%' | b'&' | b'*'
            | b'+' | b'-' | b'.' | b'^' | b'_' | b'`' | b'|' | b'~'
            | b'0'..=b'9' | b'a'..=b'z' | b'A'..=b'Z'
        );
        if byte == 255 {
            break;
        }
        byte += 1;
    }
    bytes
};

#[inline(always)]
pub(crate) const fn is_tchar(byte: u8) -> bool {
    TOKEN[byte as usize]
}

/// Returns `true` if `bytes` is a non-empty token.
pub(crate) fn is_token(bytes: &[u8]) -> bool {
    !bytes.is_empty() && bytes.iter().all(|&b| is_tchar(b))
}

#[cfg(test)]
#[test]
fn token_chars() {
    for b in b"!#$%&*+-.^_`|~09azAZ" {
        assert!(is_tchar(*b), "{:?} should be a tchar", *b as char);
    }
    for b in b" \t:;,\"'()/<=>?@[\\]{}\x7f\x00" {
        assert!(!is_tchar(*b), "{:?} should not be a tchar", *b as char);
    }
    assert!(!is_tchar(0xA9));
    assert!(!is_token(b""));
    assert!(is_token(b"Content-Length"));
}
