//! Remote rendering: Markdown → HTML and theme stylesheet downloads.
//!
//! | Capability | Remote |
//! |---|---|
//! | **Render Markdown** | `POST https://api.github.com/markdown/raw` |
//! | **Fetch stylesheet** | `GET` github-markdown-css on cdnjs, one URL per theme |
//!
//! - **Backend**: [`RenderGateway`] trait + [`GatewayError`]
//! - **GitHub**: [`GithubGateway`], the `reqwest` implementation

pub mod backend;
pub mod github;

pub use backend::{GatewayError, RenderGateway};
pub use github::{Endpoints, GithubGateway};
