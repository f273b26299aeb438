use std::time::Duration;

/// Resolve after `ms` milliseconds. Never fails. Used to artificially slow
/// fetches down so loading states are visible; not a retry or backoff
/// primitive.
pub async fn delay(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_delay_waits_the_full_interval() {
        let start = tokio::time::Instant::now();
        delay(1000).await;
        assert!(start.elapsed() >= Duration::from_millis(1000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_delay_is_immediate() {
        let start = tokio::time::Instant::now();
        delay(0).await;
        assert!(start.elapsed() < Duration::from_millis(1));
    }
}
