use async_trait::async_trait;

//
// ──────────────────────────────────────────────────────────
// Outgoing port: translation proxy
// ──────────────────────────────────────────────────────────
//

/// Best-effort machine translation.
///
/// Translation is never allowed to block or fail a page load, so the
/// port is infallible from the caller's perspective: adapters recover
/// from every failure by returning the source text unchanged.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str, source: &str, target: &str) -> String;
}
