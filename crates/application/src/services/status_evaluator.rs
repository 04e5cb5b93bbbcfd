use cdnsight_domain::{
    BlockVerdict, BlockedDetail, BlocklistSnapshot, ListedDetail, ProviderStatus,
};

/// Computes the block verdict for an origin IP against one snapshot.
///
/// Pure over its inputs: the same snapshot and IP always give the same verdict.
pub struct StatusEvaluator;

impl StatusEvaluator {
    pub fn evaluate(ip: Option<&str>, snapshot: &BlocklistSnapshot) -> BlockVerdict {
        let Some(ip) = ip else {
            return BlockVerdict::Clean;
        };
        if snapshot.is_empty() || !snapshot.lookup(ip) {
            return BlockVerdict::Clean;
        }

        let records = snapshot.records(ip);
        if records.is_empty() {
            return BlockVerdict::Listed(ListedDetail::default());
        }

        let (blocking, listed): (Vec<ProviderStatus>, Vec<ProviderStatus>) = records
            .iter()
            .map(ProviderStatus::from_record)
            .partition(ProviderStatus::is_blocking);

        if !blocking.is_empty() {
            return BlockVerdict::Blocked(BlockedDetail {
                blocked_by: blocking,
                previously_listed: listed,
            });
        }

        let last_blocked_at = listed.iter().filter_map(|p| p.last_blocked_at).max();
        BlockVerdict::Listed(ListedDetail {
            providers: listed,
            last_blocked_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cdnsight_domain::FeedDocument;
    use chrono::Utc;

    fn snapshot(body: &str) -> BlocklistSnapshot {
        let doc = FeedDocument::from_json(body).unwrap();
        BlocklistSnapshot::from_entries(&doc.data, Utc::now()).0
    }

    #[test]
    fn test_absent_ip_is_clean() {
        let snap = snapshot(r#"{"data":[{"ip":"1.2.3.4","isp":"A","stateChanges":[]}]}"#);
        assert_eq!(StatusEvaluator::evaluate(None, &snap), BlockVerdict::Clean);
    }

    #[test]
    fn test_empty_cache_is_clean() {
        let snap = BlocklistSnapshot::empty();
        assert_eq!(
            StatusEvaluator::evaluate(Some("1.2.3.4"), &snap),
            BlockVerdict::Clean
        );
    }

    #[test]
    fn test_indeterminate_history_is_listed() {
        let snap = snapshot(r#"{"data":[{"ip":"1.2.3.4","isp":"A","stateChanges":[]}]}"#);

        match StatusEvaluator::evaluate(Some("1.2.3.4"), &snap) {
            BlockVerdict::Listed(detail) => {
                assert_eq!(detail.providers.len(), 1);
                assert_eq!(detail.providers[0].blocked, None);
                assert_eq!(detail.last_blocked_at, None);
            }
            other => panic!("expected Listed, got {other:?}"),
        }
    }
}
