/// Truncate a listing to the global `--limit`, when one was given.
pub fn apply_limit<T>(items: &mut Vec<T>, limit: Option<u32>) {
    if let Some(limit) = limit.and_then(|limit| usize::try_from(limit).ok()) {
        items.truncate(limit);
    }
}
