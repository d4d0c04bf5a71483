use alloc::string::String;
use core::sync::atomic::{AtomicU32, Ordering};

const ALPHABET: &[u8; 52] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
const WIDTH: u32 = 4;

static NEXT_ID: AtomicU32 = AtomicU32::new(1);

/// The next process-wide item id: four characters over `A-Z a-z`.
///
/// The first id is `AAAB`, ids wrap after `52^4 - 1` items.
pub(crate) fn next_id() -> String {
    encode(NEXT_ID.fetch_add(1, Ordering::Relaxed))
}

fn encode(mut n: u32) -> String {
    let mut id = [b'A'; WIDTH as usize];
    for digit in id.iter_mut().rev() {
        *digit = ALPHABET[(n % 52) as usize];
        n /= 52;
    }
    id.iter().map(|&b| b as char).collect()
}

#[cfg(test)]
mod tests {
    use super::encode;

    #[test]
    fn base_52() {
        assert_eq!(encode(1), "AAAB");
        assert_eq!(encode(25), "AAAZ");
        assert_eq!(encode(26), "AAAa");
        assert_eq!(encode(51), "AAAz");
        assert_eq!(encode(52), "AABA");
        assert!(next_id_is_sorted());
    }

    fn next_id_is_sorted() -> bool {
        let a = super::next_id();
        let b = super::next_id();
        a < b
    }
}
