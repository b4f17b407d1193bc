use futures::{stream, Future, StreamExt};

use crate::config::Config;
use crate::error::Error;

/// Run `task` for every target, up to `fan_out_limit` at a time, each bounded by the
/// configured target timeout. Results are returned in target order, keyed by identity.
pub(crate) async fn fan_out<T, F, Fut>(
    config: &Config,
    targets: Vec<(String, T)>,
    task: F,
) -> Vec<(String, Result<(), Error>)>
where
    F: Fn(T) -> Fut,
    Fut: Future<Output = Result<(), Error>>,
{
    let timeout = config.target_timeout();
    stream::iter(targets)
        .map(|(identity, target)| {
            let fut = task(target);
            async move {
                let result = match timeout {
                    Some(duration) => match tokio::time::timeout(duration, fut).await {
                        Ok(result) => result,
                        Err(e) => Err(Error::from(e)),
                    },
                    None => fut.await,
                };
                (identity, result)
            }
        })
        .buffered(config.fan_out_limit())
        .collect()
        .await
}
