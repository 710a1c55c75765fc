//! Routing URLs to the closest configured path prefix
use radix_tree::Radix;
use url::Url;

fn route_key(url: &Url) -> String {
    format!("{}{}", url.host_str().unwrap_or_default(), url.path())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut routes = Radix::new();

    // Register handlers for a few path prefixes
    for (prefix, handler) in &[
        ("https://example.com/", "home"),
        ("https://example.com/blog", "blog"),
        ("https://example.com/blog/drafts", "drafts"),
        ("https://example.com/about", "about"),
    ] {
        let url = Url::parse(prefix)?;
        routes.insert(route_key(&url), handler.to_string());
    }

    // Requests resolve to the longest registered prefix
    println!("Routing requests:");
    for request in &[
        "https://example.com/blog/first-post",
        "https://example.com/blog/drafts/2024",
        "https://example.com/about",
        "https://example.com/contact",
    ] {
        let url = Url::parse(request)?;
        let (node, exact) = routes.find(route_key(&url));
        let handler = node.and_then(|n| n.value()).map(String::as_str);
        println!("  {} → {:?} (exact: {})", url, handler, exact);
    }

    // Stop at the blog handler instead of descending to the drafts one
    let url = Url::parse("https://example.com/blog/drafts/2024")?;
    let (node, _, stopped) = routes.find_func(route_key(&url), |handler| handler == "blog");
    println!(
        "\nFirst blog-level handler for {}: {:?} (stopped early: {})",
        url,
        node.and_then(|n| n.value()),
        stopped
    );

    println!("\nAll routes in order:");
    routes.next_do(|handler| println!("  {}", handler));

    Ok(())
}
