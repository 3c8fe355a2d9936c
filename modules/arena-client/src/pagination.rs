use std::future::Future;

use crate::types::Page;

/// Fetch every page of a paged resource and concatenate the items in page order.
///
/// Pages are requested sequentially starting at 1. `total_pages` is re-read
/// from each response and the loop stops once the page number exceeds it, so
/// the first page is always requested even if the collection is empty. The
/// first failing page aborts the whole fetch; no partial results are returned.
pub async fn fetch_all_pages<T, E, F, Fut>(mut fetch_page: F) -> Result<Vec<T>, E>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<Page<T>, E>>,
{
    let mut items = Vec::new();
    let mut page = 1;
    let mut total_pages = 1;

    while page <= total_pages {
        let fetched = fetch_page(page).await?;
        tracing::debug!(
            page,
            total_pages = fetched.total_pages,
            count = fetched.items.len(),
            "Fetched page"
        );
        items.extend(fetched.items);
        total_pages = fetched.total_pages;
        page += 1;
    }

    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[tokio::test]
    async fn concatenates_pages_in_order() {
        let requested = Mutex::new(Vec::new());
        let items: Result<Vec<u32>, String> = fetch_all_pages(|page| {
            requested.lock().unwrap().push(page);
            async move { Ok(Page::new(vec![page * 10, page * 10 + 1], 3)) }
        })
        .await;

        assert_eq!(items.unwrap(), vec![10, 11, 20, 21, 30, 31]);
        assert_eq!(*requested.lock().unwrap(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn empty_collection_requests_only_first_page() {
        let requested = Mutex::new(0);
        let items: Result<Vec<u32>, String> = fetch_all_pages(|_| {
            *requested.lock().unwrap() += 1;
            async { Ok(Page::new(vec![], 0)) }
        })
        .await;

        assert!(items.unwrap().is_empty());
        assert_eq!(*requested.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn total_pages_is_read_from_each_response() {
        // First page claims 5, second page shrinks it to 2.
        let items: Result<Vec<u32>, String> = fetch_all_pages(|page| async move {
            let total = if page == 1 { 5 } else { 2 };
            Ok(Page::new(vec![page], total))
        })
        .await;

        assert_eq!(items.unwrap(), vec![1, 2]);
    }

    #[tokio::test]
    async fn failing_page_aborts_without_partial_results() {
        let items: Result<Vec<u32>, String> = fetch_all_pages(|page| async move {
            if page == 2 {
                Err("boom".to_string())
            } else {
                Ok(Page::new(vec![page], 3))
            }
        })
        .await;

        assert_eq!(items.unwrap_err(), "boom");
    }
}
