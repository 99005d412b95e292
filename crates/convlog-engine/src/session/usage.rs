use convlog_types::{TurnUsage, UsageRecord};

/// Add one message's usage into a turn's running total.
///
/// Absent fields count as zero. `target` stays `None` only while no message
/// has carried usage at all. Plain summation, so merge order never matters.
pub fn merge_usage(target: &mut Option<TurnUsage>, source: &UsageRecord) {
    let total = target.get_or_insert_with(TurnUsage::default);

    total.input = total.input.saturating_add(source.input.unwrap_or(0));
    total.output = total.output.saturating_add(source.output.unwrap_or(0));
    total.cache_read = total.cache_read.saturating_add(source.cache_read.unwrap_or(0));
    total.cache_write = total.cache_write.saturating_add(source.cache_write.unwrap_or(0));
    total.total_tokens = total
        .total_tokens
        .saturating_add(source.total_tokens.unwrap_or(0));

    if let Some(cost) = &source.cost {
        total.cost.input += cost.input.unwrap_or(0.0);
        total.cost.output += cost.output.unwrap_or(0.0);
        total.cost.cache_read += cost.cache_read.unwrap_or(0.0);
        total.cost.cache_write += cost.cache_write.unwrap_or(0.0);
        total.cost.total += cost.total.unwrap_or(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use convlog_types::CostRecord;

    fn record_a() -> UsageRecord {
        UsageRecord {
            input: Some(120),
            output: Some(40),
            cache_read: None,
            cache_write: Some(8),
            total_tokens: Some(168),
            cost: Some(CostRecord {
                input: Some(0.0012),
                output: None,
                cache_read: None,
                cache_write: Some(0.0001),
                total: Some(0.0013),
            }),
        }
    }

    fn record_b() -> UsageRecord {
        UsageRecord {
            input: None,
            output: Some(15),
            cache_read: Some(900),
            cache_write: None,
            total_tokens: Some(915),
            cost: None,
        }
    }

    #[test]
    fn test_merge_into_none() {
        let mut target = None;
        merge_usage(&mut target, &record_b());

        let usage = target.unwrap();
        assert_eq!(usage.input, 0);
        assert_eq!(usage.output, 15);
        assert_eq!(usage.cache_read, 900);
        assert_eq!(usage.total_tokens, 915);
        assert_eq!(usage.cost.total, 0.0);
    }

    #[test]
    fn test_merge_sums_fields() {
        let mut target = None;
        merge_usage(&mut target, &record_a());
        merge_usage(&mut target, &record_a());

        let usage = target.unwrap();
        assert_eq!(usage.input, 240);
        assert_eq!(usage.output, 80);
        assert_eq!(usage.cache_write, 16);
        assert_eq!(usage.total_tokens, 336);
        assert!((usage.cost.total - 0.0026).abs() < 1e-12);
    }

    #[test]
    fn test_merge_is_order_independent() {
        let mut ab = None;
        merge_usage(&mut ab, &record_a());
        merge_usage(&mut ab, &record_b());

        let mut ba = None;
        merge_usage(&mut ba, &record_b());
        merge_usage(&mut ba, &record_a());

        assert_eq!(ab, ba);
    }

    #[test]
    fn test_empty_record_still_counts_as_carried() {
        let mut target = None;
        merge_usage(&mut target, &UsageRecord::default());
        assert_eq!(target, Some(TurnUsage::default()));
    }
}
