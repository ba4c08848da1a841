use domain::attachment::ImageAttachment;
use domain::completion::{
    CompletionClient, CompletionProvider, GenerationOptions, Prompt, PromptPart,
};
use domain::extract::extract_svg;
use domain::prompts;
use domain::{SvgError, SvgResult};
use shared::telemetry::Telemetry;
use tracing::{debug, error, warn};

#[derive(Debug, Clone, Copy)]
enum Operation {
    GenerateFromText,
    GenerateFromImage,
    OptimizeSvg,
    OptimizePrompt,
}

impl Operation {
    fn label(self) -> &'static str {
        match self {
            Operation::GenerateFromText => "generate_from_text",
            Operation::GenerateFromImage => "generate_from_image",
            Operation::OptimizeSvg => "optimize_svg",
            Operation::OptimizePrompt => "optimize_prompt",
        }
    }

    fn failure(self) -> &'static str {
        match self {
            Operation::GenerateFromText => "The AI service failed to process the text prompt.",
            Operation::GenerateFromImage => "The AI service failed to process the image.",
            Operation::OptimizeSvg => "The AI service failed to optimize the SVG.",
            Operation::OptimizePrompt => "Failed to optimize the prompt.",
        }
    }

    fn no_svg(self) -> &'static str {
        match self {
            Operation::GenerateFromImage => {
                "Failed to convert image to SVG. The AI response did not contain SVG code."
            }
            Operation::OptimizeSvg => {
                "Failed to optimize SVG. The AI response did not contain SVG code."
            }
            Operation::GenerateFromText | Operation::OptimizePrompt => {
                "Failed to generate valid SVG. The AI response did not contain SVG code."
            }
        }
    }
}

/// The four model-backed operations. Each call is one completion; nothing is
/// retried or queued.
pub struct SvgService<P> {
    provider: P,
}

impl<P: CompletionProvider> SvgService<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub async fn generate_from_text(
        &self,
        user_message: &str,
        conversation_history: &str,
        current_svg: &str,
    ) -> SvgResult<String> {
        let prompt = prompts::text_generation_prompt(user_message, conversation_history, current_svg);
        let options =
            GenerationOptions::new(prompts::TEXT_SYSTEM_INSTRUCTION, prompts::TEXT_TEMPERATURE);
        let raw = self
            .complete(Operation::GenerateFromText, Prompt::Text(prompt), options)
            .await?;
        Self::require_svg(Operation::GenerateFromText, &raw)
    }

    /// `image_data_uri` is a `data:image/...;base64,` URI. The tracing
    /// directive travels in the text part; no system instruction is sent.
    pub async fn generate_from_image(
        &self,
        image_data_uri: &str,
        user_prompt: &str,
    ) -> SvgResult<String> {
        let image = ImageAttachment::from_data_uri(image_data_uri);
        let prompt = Prompt::Parts(vec![
            PromptPart::InlineImage {
                mime_type: image.mime_type.to_string(),
                data: image.data,
            },
            PromptPart::Text(prompts::image_trace_instruction(user_prompt)),
        ]);
        let raw = self
            .complete(
                Operation::GenerateFromImage,
                prompt,
                GenerationOptions::default(),
            )
            .await?;
        Self::require_svg(Operation::GenerateFromImage, &raw)
    }

    pub async fn optimize_svg(&self, current_svg: &str, instruction: &str) -> SvgResult<String> {
        let prompt = prompts::optimize_svg_prompt(current_svg, instruction);
        let options = GenerationOptions::new(
            prompts::OPTIMIZE_SVG_SYSTEM_INSTRUCTION,
            prompts::OPTIMIZE_SVG_TEMPERATURE,
        );
        let raw = self
            .complete(Operation::OptimizeSvg, Prompt::Text(prompt), options)
            .await?;
        Self::require_svg(Operation::OptimizeSvg, &raw)
    }

    /// Returns the model's rewrite trimmed, with no SVG extraction.
    pub async fn optimize_prompt(&self, original_prompt: &str) -> SvgResult<String> {
        let prompt = prompts::optimize_prompt_prompt(original_prompt);
        let options = GenerationOptions::new(
            prompts::OPTIMIZE_PROMPT_SYSTEM_INSTRUCTION,
            prompts::OPTIMIZE_PROMPT_TEMPERATURE,
        );
        let raw = self
            .complete(Operation::OptimizePrompt, Prompt::Text(prompt), options)
            .await?;
        Ok(raw.trim().to_string())
    }

    async fn complete(
        &self,
        op: Operation,
        prompt: Prompt,
        options: GenerationOptions,
    ) -> SvgResult<String> {
        // Missing credential surfaces here, before any request is built.
        let client = self.provider.connect()?;
        let telemetry = Telemetry::start(op.label());
        debug!(
            operation = telemetry.label(),
            model = self.provider.model(),
            temperature = ?options.temperature,
            "requesting completion"
        );
        match client.complete(prompt, options).await {
            Ok(text) => {
                debug!(
                    operation = telemetry.label(),
                    elapsed_ms = telemetry.elapsed_ms() as u64,
                    "completion finished"
                );
                Ok(text)
            }
            Err(source) => {
                error!(operation = telemetry.label(), error = %source, "completion failed");
                Err(SvgError::GenerationFailed {
                    context: op.failure(),
                    source,
                })
            }
        }
    }

    fn require_svg(op: Operation, raw: &str) -> SvgResult<String> {
        match extract_svg(raw) {
            Some(svg) => Ok(svg),
            None => {
                warn!(operation = op.label(), response = raw, "AI response contained no SVG");
                Err(SvgError::EmptyGenerationResult(op.no_svg()))
            }
        }
    }
}
