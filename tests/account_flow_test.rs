use std::sync::Arc;

use authcode::account::AccountManager;
use authcode::config::ConfigStore;

#[test]
fn set_account_then_generate_code_flow() {
    let temp = tempfile::tempdir().unwrap();
    let dirs = vec![temp.path().to_path_buf()];

    let store = Arc::new(ConfigStore::with_search_dirs(dirs.clone()));
    store.initialize();
    let accounts = AccountManager::new(Arc::clone(&store));

    assert!(accounts.set_account("alice", "jbswy3dpehpk3pxp"));
    assert_eq!(accounts.get_account_name(), "alice");

    let code = accounts.generate_code().expect("code for valid secret");
    assert_eq!(code.len(), 6);
    assert!(code.chars().all(|c| c.is_ascii_digit()));

    // The account survives a process restart via the persisted store.
    let restarted_store = Arc::new(ConfigStore::with_search_dirs(dirs));
    assert!(restarted_store.load());
    let restarted = AccountManager::new(restarted_store);

    assert_eq!(restarted.get_account_name(), "alice");
    assert_eq!(
        restarted.generate_code_at(1_000_000),
        accounts.generate_code_at(1_000_000)
    );
}
