use once_cell::unsync::OnceCell;
use std::fmt;

/// How an element attaches to the one before it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Combinator {
    #[default]
    None,
    Descendant,
    Child,
    Adjacent,
    Sibling,
    /// `&`, attaches directly to the enclosing selector
    Parent,
}

impl Combinator {
    pub fn to_css(self) -> &'static str {
        match self {
            Combinator::None | Combinator::Parent => "",
            Combinator::Descendant => " ",
            Combinator::Child => " > ",
            Combinator::Adjacent => " + ",
            Combinator::Sibling => " ~ ",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub combinator: Combinator,
    pub value: String,
}

impl Element {
    pub fn new(combinator: Combinator, value: impl Into<String>) -> Self {
        Self {
            combinator,
            value: value.into(),
        }
    }

    pub fn to_css(&self) -> String {
        format!("{}{}", self.combinator.to_css(), self.value)
    }
}

/// One selector of a selector group, e.g. `#theme > .mixin`.
#[derive(Debug, Clone)]
pub struct Selector {
    elements: Vec<Element>,
    css: OnceCell<String>,
}

/// Selectors from the outermost ruleset inward; rendered by concatenation.
pub type SelectorPath = Vec<Selector>;

impl Selector {
    pub fn new(mut elements: Vec<Element>) -> Self {
        if let Some(first) = elements.first_mut() {
            if first.combinator == Combinator::None {
                first.combinator = Combinator::Descendant;
            }
        }
        Self {
            elements,
            css: OnceCell::new(),
        }
    }

    /// Splits selector text into elements. Compound selectors are split at
    /// every class, id, pseudo-class and attribute part (`a.b:hover` is
    /// three elements joined without a combinator).
    pub fn parse(text: &str) -> Selector {
        let mut parser = ElementParser::default();
        let mut depth = 0usize;
        let mut previous = None;

        for ch in text.chars() {
            if depth > 0 {
                match ch {
                    '[' | '(' => depth += 1,
                    ']' | ')' => depth -= 1,
                    _ => {}
                }
                parser.value.push(ch);
                previous = Some(ch);
                continue;
            }

            match ch {
                c if c.is_whitespace() => {
                    parser.flush();
                    if !parser.elements.is_empty() && parser.combinator == Combinator::None {
                        parser.combinator = Combinator::Descendant;
                    }
                }
                '>' => parser.combine(Combinator::Child),
                '+' => parser.combine(Combinator::Adjacent),
                '~' => parser.combine(Combinator::Sibling),
                '&' => {
                    parser.combine(Combinator::Parent);
                    parser.started = true;
                }
                ':' if previous == Some(':') => parser.value.push(ch),
                '.' | '#' | ':' | '[' => {
                    if !parser.value.is_empty() {
                        parser.flush();
                    }
                    if ch == '[' {
                        depth += 1;
                    }
                    parser.value.push(ch);
                }
                '(' => {
                    depth += 1;
                    parser.value.push(ch);
                }
                _ => parser.value.push(ch),
            }
            previous = Some(ch);
        }

        parser.flush();
        Selector::new(parser.elements)
    }

    /// Parses a comma separated selector group.
    pub fn parse_group(text: &str) -> Vec<Selector> {
        let mut selectors = Vec::new();
        let mut depth = 0usize;
        let mut start = 0;

        for (index, ch) in text.char_indices() {
            match ch {
                '[' | '(' => depth += 1,
                ']' | ')' => depth = depth.saturating_sub(1),
                ',' if depth == 0 => {
                    selectors.push(Selector::parse(&text[start..index]));
                    start = index + 1;
                }
                _ => {}
            }
        }
        selectors.push(Selector::parse(&text[start..]));
        selectors.retain(|selector| !selector.is_empty());
        selectors
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Same selector without its first element, or `None` for a single
    /// element.
    pub fn tail(&self) -> Option<Selector> {
        if self.elements.len() > 1 {
            Some(Selector::new(self.elements[1..].to_vec()))
        } else {
            None
        }
    }

    /// Compares first elements only.
    pub fn matches(&self, other: &Selector) -> bool {
        match (self.elements.first(), other.elements.first()) {
            (Some(ours), Some(theirs)) => ours.value == theirs.value,
            _ => false,
        }
    }

    pub fn to_css(&self) -> &str {
        self.css
            .get_or_init(|| self.elements.iter().map(Element::to_css).collect())
    }

    fn parent_index(&self) -> Option<usize> {
        self.elements
            .iter()
            .skip(1)
            .position(|element| element.combinator == Combinator::Parent)
            .map(|index| index + 1)
    }
}

impl PartialEq for Selector {
    fn eq(&self, other: &Self) -> bool {
        self.elements == other.elements
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_css().trim())
    }
}

#[derive(Default)]
struct ElementParser {
    elements: Vec<Element>,
    combinator: Combinator,
    value: String,
    started: bool,
}

impl ElementParser {
    fn flush(&mut self) {
        if self.started || !self.value.is_empty() {
            let value = std::mem::take(&mut self.value);
            self.elements.push(Element::new(self.combinator, value));
            self.combinator = Combinator::None;
            self.started = false;
        }
    }

    fn combine(&mut self, combinator: Combinator) {
        self.flush();
        self.combinator = combinator;
    }
}

/// Every selector of a ruleset prefixed by every path of its context.
pub fn combine_paths(context: &[SelectorPath], selectors: &[Selector]) -> Vec<SelectorPath> {
    if context.is_empty() {
        return selectors
            .iter()
            .map(|selector| vec![selector.clone()])
            .collect();
    }

    let mut paths = Vec::with_capacity(context.len() * selectors.len());
    for selector in selectors {
        for prefix in context {
            paths.push(extend_path(prefix, selector));
        }
    }
    paths
}

/// Appends `selector` to `prefix`. A `&` after the first element is
/// replaced by the whole prefix (`div &` inside `a` gives `div a`).
fn extend_path(prefix: &SelectorPath, selector: &Selector) -> SelectorPath {
    let Some(index) = selector.parent_index() else {
        let mut path = prefix.clone();
        path.push(selector.clone());
        return path;
    };

    let elements = selector.elements();
    let mut spliced: Vec<Element> = elements[..index].to_vec();

    let mut inherited = prefix
        .iter()
        .flat_map(|outer| outer.elements().iter().cloned());
    if let Some(mut first) = inherited.next() {
        first.combinator = Combinator::Descendant;
        spliced.push(first);
    }
    spliced.extend(inherited);

    let parent = &elements[index];
    if !parent.value.is_empty() {
        spliced.push(Element::new(Combinator::None, parent.value.clone()));
    }
    spliced.extend(elements[index + 1..].iter().cloned());

    vec![Selector::new(spliced)]
}

/// Header text for a set of paths; more than three paths go one per line.
pub fn render_paths(paths: &[SelectorPath]) -> String {
    let rendered: Vec<String> = paths
        .iter()
        .map(|path| {
            path.iter()
                .map(Selector::to_css)
                .collect::<String>()
                .trim()
                .to_string()
        })
        .collect();

    let separator = if rendered.len() > 3 { ",\n" } else { ", " };
    rendered.join(separator)
}
