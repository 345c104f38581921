//! 唯一 ID 產生邏輯

use std::collections::HashSet;
use uuid::Uuid;

/// 從集合中產生唯一的隨機 ID
pub fn generate_unique_id(used_ids: &mut HashSet<Uuid>) -> Uuid {
    loop {
        let new_id = Uuid::new_v4();
        if used_ids.insert(new_id) {
            return new_id;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_unique_id_records_id() {
        let mut used = HashSet::new();
        let a = generate_unique_id(&mut used);
        let b = generate_unique_id(&mut used);
        assert_ne!(a, b);
        assert!(used.contains(&a));
        assert!(used.contains(&b));
        assert_eq!(used.len(), 2);
    }
}
