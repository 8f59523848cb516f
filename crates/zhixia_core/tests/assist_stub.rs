use std::time::Duration;
use zhixia_core::{
    AnalyzeRequest, AssistConfig, AssistError, AssistProvider, Chapter, ChapterPatch,
    EditorSession, GenerateRequest, MemoryKeyValueStore, MockAssistProvider, ProjectRepository,
    ProjectStore, StoreConfig,
};

fn generate_request(model_id: &str, prompt: &str) -> GenerateRequest {
    GenerateRequest {
        model_id: model_id.to_string(),
        prompt: prompt.to_string(),
        referenced_chapter_ids: Vec::new(),
    }
}

#[tokio::test(start_paused = true)]
async fn generate_waits_for_configured_delay() {
    let provider = MockAssistProvider::default();
    assert_eq!(provider.config().delay, Duration::from_secs(2));

    let started = tokio::time::Instant::now();
    let text = provider
        .generate(generate_request("gpt-4", "继续发展当前的情节"))
        .await
        .unwrap();

    assert!(started.elapsed() >= Duration::from_secs(2));
    assert!(!text.is_empty());
}

#[tokio::test(start_paused = true)]
async fn invalid_requests_fail_before_delay() {
    let provider = MockAssistProvider::new(AssistConfig {
        delay: Duration::from_secs(30),
    });
    let started = tokio::time::Instant::now();

    let unknown = provider
        .generate(generate_request("gpt-5", "prompt"))
        .await
        .unwrap_err();
    assert_eq!(unknown, AssistError::UnknownModel("gpt-5".to_string()));

    let blank = provider
        .analyze(AnalyzeRequest {
            model_id: "gpt-3.5".to_string(),
            prompt: " ".to_string(),
            chapter: Chapter::new("第1章", 0),
        })
        .await
        .unwrap_err();
    assert_eq!(blank, AssistError::BlankPrompt);
    assert_eq!(started.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn analyze_report_is_headed_by_chapter_title() {
    let provider = MockAssistProvider::default();
    let report = provider
        .analyze(AnalyzeRequest {
            model_id: "gpt-4".to_string(),
            prompt: "分析本章节的故事结构".to_string(),
            chapter: Chapter::new("月夜", 0),
        })
        .await
        .unwrap();
    assert!(report.starts_with("# 月夜"));
}

#[tokio::test(start_paused = true)]
async fn editing_continues_while_generation_is_pending() {
    let store = ProjectStore::new(MemoryKeyValueStore::new(), StoreConfig::default());
    let project = store.create_project("p").unwrap();
    let mut session = EditorSession::open(&store, &project.id).unwrap().unwrap();
    let id = session.add_chapter().unwrap();

    let provider = MockAssistProvider::default();
    let pending = provider.generate(GenerateRequest {
        model_id: "gpt-4".to_string(),
        prompt: "续写".to_string(),
        referenced_chapter_ids: vec![id.clone()],
    });
    session
        .update_chapter(&id, &ChapterPatch::content("用户先写的"))
        .unwrap();
    let generated = pending.await.unwrap();

    assert!(session.apply_generated_text(&generated).unwrap());
    let stored = store.get_project(&project.id).unwrap().unwrap();
    assert_eq!(
        stored.chapters[0].content,
        format!("用户先写的\n\n{generated}")
    );
}
