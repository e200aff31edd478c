//! Theme palette and class strings
//!
//! The default [`Theme`] uses Tailwind utility classes. [`Theme::plain`]
//! drops every framework class so that only caller-supplied classes and
//! inline styles remain.

/// Color palette of the page shell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
	pub primary: &'static str,
	pub bg: &'static str,
	pub bg_dark: &'static str,
	pub border_color: &'static str,
	pub input_label_color: &'static str,
	pub gray_color: &'static str,
}

impl Palette {
	pub const DEFAULT: Palette = Palette {
		primary: "#47751B",
		bg: "#333333",
		bg_dark: "#161616",
		border_color: "#60883A",
		input_label_color: "#AFAFAF",
		gray_color: "#D9D9D9",
	};

	/// Color names paired with their values, named as Tailwind classes see them
	pub fn colors(&self) -> [(&'static str, &'static str); 6] {
		[
			("primary", self.primary),
			("bg", self.bg),
			("bgDark", self.bg_dark),
			("borderColor", self.border_color),
			("inputLabelColor", self.input_label_color),
			("grayColor", self.gray_color),
		]
	}

	/// CSS custom properties for the palette, one per color
	///
	/// # Examples
	///
	/// ```
	/// use dynaform_pages::theme::Palette;
	///
	/// let css = Palette::DEFAULT.css_variables();
	/// assert!(css.starts_with(":root {"));
	/// assert!(css.contains("--color-primary: #47751B;"));
	/// ```
	pub fn css_variables(&self) -> String {
		let mut css = String::from(":root {");
		for (name, value) in self.colors() {
			css.push_str(&format!(" --color-{}: {};", name, value));
		}
		css.push_str(" }");
		css
	}
}

impl Default for Palette {
	fn default() -> Self {
		Self::DEFAULT
	}
}

/// Class strings applied by the renderer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
	pub palette: Palette,
	/// Page wrapper around the heading and the form
	pub page: &'static str,
	pub heading: &'static str,
	/// Wrapper around label, control and message of one field
	pub field_container: &'static str,
	pub label: &'static str,
	/// Size and shape shared by every control
	pub control: &'static str,
	/// Border width, omitted for file inputs
	pub border: &'static str,
	pub error_border: &'static str,
	/// Border color of `textarea` and `select` controls
	pub border_color: &'static str,
	/// Border color of `input` controls
	pub input_border_color: &'static str,
	pub control_padding: &'static str,
	pub error_message: &'static str,
	pub button: &'static str,
}

impl Theme {
	pub fn tailwind() -> Self {
		Self {
			palette: Palette::DEFAULT,
			page: "flex flex-col justify-center items-center w-[100%]",
			heading: "text-xl font-semibold",
			field_container: "flex flex-col gap-1 h-[85px]",
			label: "text-[16px] font-semibold",
			control: "h-[45px] w-[100%] rounded-xl",
			border: "border-2",
			error_border: "!border-[red]",
			border_color: "border-grayColor",
			input_border_color: "border-gray-700",
			control_padding: "pl-3",
			error_message: "text-[12px] leading-[13.92px] ml-2 text-[red]",
			button: "px-5 py-2 bg-blue-700 rounded-md text-center font-semibold mt-2",
		}
	}

	pub fn plain() -> Self {
		Self {
			palette: Palette::DEFAULT,
			page: "",
			heading: "",
			field_container: "",
			label: "",
			control: "",
			border: "",
			error_border: "",
			border_color: "",
			input_border_color: "",
			control_padding: "",
			error_message: "",
			button: "",
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::tailwind()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_palette_colors() {
		let colors = Palette::DEFAULT.colors();

		assert_eq!(colors[0], ("primary", "#47751B"));
		assert_eq!(colors[5], ("grayColor", "#D9D9D9"));
	}

	#[rstest]
	fn test_css_variables_cover_palette() {
		let css = Palette::default().css_variables();

		for (name, value) in Palette::DEFAULT.colors() {
			assert!(css.contains(&format!("--color-{}: {};", name, value)));
		}
		assert!(css.ends_with('}'));
	}

	#[rstest]
	fn test_default_theme_is_tailwind() {
		assert_eq!(Theme::default(), Theme::tailwind());
		assert_eq!(Theme::plain().control, "");
	}
}
