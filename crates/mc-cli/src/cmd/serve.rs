use std::path::Path;

pub fn run(root: &Path, port: u16, no_open: bool) -> anyhow::Result<()> {
    let config = mc_core::config::Config::load_or_default(root)?;
    for w in config.validate() {
        tracing::warn!(level = ?w.level, "{}", w.message);
    }

    let rt = tokio::runtime::Runtime::new()?;
    let root_buf = root.to_path_buf();

    rt.block_on(async move {
        let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{port}")).await?;
        let actual_port = listener.local_addr()?.port();
        println!(
            "{} → http://localhost:{actual_port}",
            config.dashboard.name
        );

        tokio::select! {
            res = mc_server::serve_on(root_buf, listener, !no_open) => res,
            _ = tokio::signal::ctrl_c() => Ok(()),
        }
    })
}
