//! Prompt text for the four model operations.
//!
//! Text generation and the two optimizers carry their directive in the
//! system-instruction field. Image tracing folds its directive into the text
//! part next to the image and sends no system instruction.

pub const TEXT_SYSTEM_INSTRUCTION: &str = "You are an expert SVG generator. Your task is to create clean, optimized, and valid SVG code based on user requests.
- Respond ONLY with the raw SVG code.
- Do NOT include any extra text, explanations, or markdown fences like ```svg.
- Ensure the SVG is well-formed XML.
- If the user provides an existing SVG, modify it. Otherwise, create a new one.
- Default to a 24x24 viewbox if not specified.
- Use black fill by default unless a color is requested.";

pub const TEXT_TEMPERATURE: f32 = 0.2;

pub const OPTIMIZE_SVG_SYSTEM_INSTRUCTION: &str = "You are an SVG optimization expert.
Your task is to take the provided SVG code and optimize it based on the user's request.
- Simplify paths, remove redundant attributes, and minimize file size.
- Maintain visual integrity.
- Respond ONLY with the raw, optimized SVG code, without any markdown or explanations.";

pub const OPTIMIZE_SVG_TEMPERATURE: f32 = 0.0;

pub const OPTIMIZE_PROMPT_SYSTEM_INSTRUCTION: &str = "You are an expert at writing prompts for SVG generation. Your task is to take a user's basic prompt and enhance it to create better, more detailed SVG icons.

Guidelines for optimization:
- Add specific details about style (modern, minimalist, flat, outlined, etc.)
- Specify colors if not mentioned (suggest appropriate ones)
- Add details about stroke width, fill, and visual style
- Mention icon-appropriate sizing and scalability
- Keep it concise but descriptive
- Focus on creating clean, professional icons

Return ONLY the optimized prompt, nothing else.";

pub const OPTIMIZE_PROMPT_TEMPERATURE: f32 = 0.3;

pub fn text_generation_prompt(user_message: &str, history: &str, current_svg: &str) -> String {
    format!(
        "\nConversation History:\n{history}\n\nCurrent SVG Code:\n{current_svg}\n\nUser Request: \"{user_message}\"\n\nBased on the user's request, generate the new SVG code.\n"
    )
}

pub fn image_trace_instruction(user_prompt: &str) -> String {
    format!(
        "Trace this image to create a clean, single-color, black-on-transparent SVG. \n        \
         Optimize for simplicity and scalability. Make it look like a modern icon. \n        \
         If the user provided a prompt, use it for guidance: \"{user_prompt}\".\n        \
         Provide ONLY the raw SVG code as your response, without any explanations or markdown formatting. The SVG should have a viewBox attribute."
    )
}

pub fn optimize_svg_prompt(current_svg: &str, instruction: &str) -> String {
    format!("\nUser request: \"{instruction}\"\n\nCurrent SVG to optimize:\n{current_svg}\n")
}

pub fn optimize_prompt_prompt(original: &str) -> String {
    format!(
        "Original prompt: \"{original}\"\n\nOptimize this prompt for creating a professional SVG icon."
    )
}
