use domain::Location;
use noise_storage::{
    InMemoryLocationStore, LocationStore, PgLocationStore, SQLITE_MEMORY, SqliteLocationStore,
    connect_pool, connect_sqlite_pool, init_postgres_schema, init_sqlite_schema,
};

async fn sqlite_store() -> SqliteLocationStore {
    let pool = connect_sqlite_pool(SQLITE_MEMORY, 1).await.expect("pool");
    init_sqlite_schema(&pool).await.expect("schema");
    SqliteLocationStore::new(pool)
}

/// 连接 NOISE_DATABASE_URL 指向的测试库；未设置时返回 None。
async fn postgres_store() -> Option<PgLocationStore> {
    let url = std::env::var("NOISE_DATABASE_URL").ok()?;
    let pool = connect_pool(&url, 2).await.expect("pool");
    init_postgres_schema(&pool).await.expect("schema");
    Some(PgLocationStore::new(pool))
}

async fn reset_postgres(store: &PgLocationStore) {
    sqlx::query("truncate table locations restart identity")
        .execute(&store.pool)
        .await
        .expect("truncate");
}

fn chosen(name: &str) -> Location {
    Location {
        chosen: true,
        ..Location::new(name, 70.0)
    }
}

async fn chosen_is_unique(store: &dyn LocationStore) {
    let a = store.create(&chosen("Room_A")).await.expect("create");
    let b = store.create(&chosen("Room_B")).await.expect("create");
    assert!(a.id > 0);
    assert_ne!(a.id, b.id);

    let current = store.read_chosen().await.expect("chosen").expect("exists");
    assert_eq!(current.id, b.id);

    assert!(store.set_chosen(a.id).await.expect("set"));
    assert!(store.set_chosen(a.id).await.expect("set"));
    let all = store.read_all().await.expect("all");
    let chosen: Vec<i64> = all.iter().filter(|item| item.chosen).map(|item| item.id).collect();
    assert_eq!(chosen, vec![a.id]);

    // 不存在的 id：回滚，原选中保持不变
    assert!(!store.set_chosen(9_999).await.expect("set"));
    let current = store.read_chosen().await.expect("chosen").expect("exists");
    assert_eq!(current.id, a.id);
}

async fn list_threshold_delete(store: &dyn LocationStore) {
    store.create(&Location::new("Zeta", 70.0)).await.expect("create");
    let alpha = store.create(&Location::new("Alpha", 70.0)).await.expect("create");
    assert!(store.read_chosen().await.expect("chosen").is_none());

    let names: Vec<String> = store
        .read_all()
        .await
        .expect("all")
        .into_iter()
        .map(|item| item.name)
        .collect();
    assert_eq!(names, vec!["Alpha".to_string(), "Zeta".to_string()]);

    assert!(store.update_threshold(alpha.id, 180.0).await.expect("threshold"));
    assert!(!store.update_threshold(9_999, 50.0).await.expect("threshold"));
    let all = store.read_all().await.expect("all");
    assert_eq!(all[0].threshold, 180.0);

    assert!(store.create(&Location::new("Alpha", 70.0)).await.is_err());

    assert_eq!(store.delete(alpha.id).await.expect("delete"), 1);
    assert_eq!(store.delete(alpha.id).await.expect("delete"), 0);
}

#[tokio::test]
async fn in_memory_chosen_is_unique() {
    chosen_is_unique(&InMemoryLocationStore::new()).await;
}

#[tokio::test]
async fn in_memory_list_threshold_delete() {
    list_threshold_delete(&InMemoryLocationStore::new()).await;
}

#[tokio::test]
async fn sqlite_chosen_is_unique() {
    chosen_is_unique(&sqlite_store().await).await;
}

#[tokio::test]
async fn sqlite_list_threshold_delete() {
    list_threshold_delete(&sqlite_store().await).await;
}

#[tokio::test]
#[ignore = "requires NOISE_DATABASE_URL"]
async fn postgres_location_scenarios() {
    let Some(store) = postgres_store().await else {
        return;
    };
    reset_postgres(&store).await;
    chosen_is_unique(&store).await;
    reset_postgres(&store).await;
    list_threshold_delete(&store).await;
}
