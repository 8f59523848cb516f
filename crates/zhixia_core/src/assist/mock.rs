//! Fixed-delay assist stub returning canned text.

use super::{validate_request, AnalyzeRequest, AssistError, AssistProvider, GenerateRequest};
use log::info;
use std::time::Duration;

const DEFAULT_DELAY: Duration = Duration::from_secs(2);

const GENERATED_PASSAGE: &str = "在这个寂静的夜晚，月光如水般倾泻而下，为整个世界镀上一层银白色的光辉。远处的山峦如同巨人的剪影，静静地矗立在天际线上。微风轻拂，带来阵阵花香，让人不禁想起那些逝去的美好时光。

张明站在窗前，望着这幅美丽的夜景，内心却久久不能平静。今天发生的一切，就像一场梦一样，让他难以置信。他的手中紧握着那封信，信纸已经被汗水浸湿，字迹也变得有些模糊，但那些文字所承载的信息，却深深地刻在了他的脑海中。";

const ANALYSIS_BODY: &str = "## 整体评价
本章节结构完整，情节发展自然，人物刻画生动。通过细腻的心理描写和环境渲染，成功营造了深沉的情感氛围。

## 详细分析

### 1. 故事结构
- 开篇设置悬念，通过信件引发读者好奇
- 中段通过回忆推进情节
- 结尾留有余韵，为下章埋下伏笔

### 2. 人物刻画
- 主角心理活动描写细腻
- 通过细节展现人物性格
- 情感表达真实自然

### 3. 场景描写
- 夜景描写优美，意境深远
- 环境与人物情感呼应
- 意象运用恰当

### 4. 写作建议
- 可适当加强动作描写
- 建议增加对话情节
- 考虑补充更多感官描写

## 总结
本章节整体质量良好，具有较强的文学性和艺术性。建议在后续创作中继续保持，并注意上述建议点。";

/// Stub settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssistConfig {
    /// Simulated latency of every call.
    pub delay: Duration,
}

impl Default for AssistConfig {
    fn default() -> Self {
        Self {
            delay: DEFAULT_DELAY,
        }
    }
}

/// Assist provider that waits `AssistConfig::delay` and returns static text.
#[derive(Debug, Clone, Default)]
pub struct MockAssistProvider {
    config: AssistConfig,
}

impl MockAssistProvider {
    pub fn new(config: AssistConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> AssistConfig {
        self.config
    }
}

#[async_trait::async_trait]
impl AssistProvider for MockAssistProvider {
    async fn generate(&self, request: GenerateRequest) -> Result<String, AssistError> {
        validate_request(&request.model_id, &request.prompt)?;
        tokio::time::sleep(self.config.delay).await;
        info!(
            "event=assist_generate module=assist status=ok model={} referenced_chapters={}",
            request.model_id,
            request.referenced_chapter_ids.len()
        );
        Ok(GENERATED_PASSAGE.to_string())
    }

    async fn analyze(&self, request: AnalyzeRequest) -> Result<String, AssistError> {
        validate_request(&request.model_id, &request.prompt)?;
        tokio::time::sleep(self.config.delay).await;
        info!(
            "event=assist_analyze module=assist status=ok model={} chapter_id={}",
            request.model_id, request.chapter.id
        );
        Ok(format!(
            "# {} - 分析报告\n\n{ANALYSIS_BODY}",
            request.chapter.title
        ))
    }
}
