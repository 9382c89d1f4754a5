use anyhow::Result;
use batchsign_azure_batch::{
    resolve, ClientRequestIdInterceptor, Config, DetailLevel, DetailLevelInterceptor,
    ServerTimeoutInterceptor,
};
use batchsign_core::{InterceptorChain, OperationKind, OsEnv, RequestDescriptor};
use http::Method;

fn main() -> Result<()> {
    // Initialize logging, set RUST_LOG=debug to see the string to sign.
    env_logger::init();

    // Load config from AZURE_BATCH_* env, falling back to a demo account.
    let mut config = Config::default().from_env(&OsEnv);
    let demo_mode = resolve(&config).is_none();
    if demo_mode {
        println!("No Azure Batch credentials found, using demo mode");
        println!("To use real credentials, set AZURE_BATCH_ACCOUNT and AZURE_BATCH_ACCESS_KEY");
        println!();

        config.account_name = Some("mybatchaccount".to_string());
        config.account_key = Some("c2VjcmV0".to_string());
    }
    let endpoint = config
        .endpoint
        .clone()
        .unwrap_or_else(|| "https://mybatchaccount.westus.batch.azure.com".to_string());

    let provider = resolve(&config).ok_or_else(|| anyhow::anyhow!("no credential resolved"))?;
    println!("Using credential provider: {}", provider.name());

    // Behaviors run first, the credential interceptor signs the final request.
    let chain = InterceptorChain::new()
        .push(ServerTimeoutInterceptor::new(30))
        .push(ClientRequestIdInterceptor::new())
        .push(DetailLevelInterceptor::new(
            DetailLevel::new()
                .with_select("id,state")
                .with_filter("state eq 'active'"),
        ))
        .push_shared(provider.into_interceptor(None)?);

    let op = OperationKind::new("Job_List")
        .with_timeout()
        .with_odata_query()
        .with_client_request_id();
    let req = RequestDescriptor::new(
        Method::GET,
        &format!("{endpoint}/jobs?api-version=2024-07-01.20.0"),
    )?
    .with_operation(op);

    let (mut parts, _) = http::Request::get("https://placeholder/").body(())?.into_parts();
    chain.apply(req)?.apply(&mut parts)?;

    println!("Signed request: {} {}", parts.method, parts.uri);
    for (name, value) in parts.headers.iter() {
        println!("  {name}: {value:?}");
    }

    Ok(())
}
