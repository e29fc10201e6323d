use marketview::chat::{ChatClient, ChatLink};

use crate::support::{client, seeded};

#[tokio::test]
async fn reply_links_are_extracted() {
    let api = client(seeded()).await;
    let reply = api.ask("  Any VinFast cars?  ").await.unwrap();

    assert_eq!(
        reply.links,
        vec![
            ChatLink {
                label: "VinFast VF 8".into(),
                target: "/vehicles/v1".into()
            },
            ChatLink {
                label: "/auctions/a7".into(),
                target: "/auctions/a7".into()
            },
        ]
    );
}

#[tokio::test]
async fn plain_reply_has_no_links() {
    let api = client(seeded()).await;
    let reply = api.ask("hello").await.unwrap();
    assert!(reply.links.is_empty());
    assert!(!reply.text.is_empty());
}
