//! Element and attribute views handed to the matcher on element start.

/// Namespace of the `xml:lang` attribute.
pub const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// Declared type of an attribute, as reported by the document parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AttributeType {
    /// Character data (the default without a DTD).
    #[default]
    Cdata,
    /// An ID-typed attribute, matched by `#id` conditions.
    Id,
    /// Any other declared type.
    Other,
}

/// A namespace-qualified attribute of an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Namespace URI, `None` for no namespace.
    pub namespace: Option<String>,
    /// Local name.
    pub local_name: String,
    /// Attribute value.
    pub value: String,
    /// Declared type.
    pub kind: AttributeType,
}

impl Attribute {
    /// Create a CDATA attribute in no namespace.
    pub fn new(local_name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            namespace: None,
            local_name: local_name.into(),
            value: value.into(),
            kind: AttributeType::Cdata,
        }
    }

    /// Create a namespace-qualified CDATA attribute.
    pub fn namespaced(
        namespace: impl Into<String>,
        local_name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            namespace: Some(namespace.into()),
            ..Self::new(local_name, value)
        }
    }

    /// Set the declared type.
    pub fn with_kind(mut self, kind: AttributeType) -> Self {
        self.kind = kind;
        self
    }

    /// Whether this attribute has the given qualified name.
    pub fn is_named(&self, namespace: Option<&str>, local_name: &str) -> bool {
        self.namespace.as_deref() == namespace && self.local_name == local_name
    }

    /// Whether this attribute identifies its element for `#id` conditions.
    ///
    /// Without a DTD no attribute is declared as an ID, so a plain `id`
    /// attribute and `xml:id` count as well.
    pub fn is_id(&self) -> bool {
        self.kind == AttributeType::Id
            || self.is_named(None, "id")
            || self.is_named(Some(XML_NAMESPACE), "id")
    }
}

/// One element start event.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    /// Namespace URI, `None` for no namespace.
    pub namespace: Option<String>,
    /// Local name.
    pub local_name: String,
    /// Attributes in document order.
    pub attributes: Vec<Attribute>,
    /// Pseudo-classes that currently apply (e.g. `link`).
    pub pseudo_classes: Vec<String>,
}

impl Element {
    /// Create an element in no namespace.
    pub fn new(local_name: impl Into<String>) -> Self {
        Self {
            local_name: local_name.into(),
            ..Default::default()
        }
    }

    /// Create a namespace-qualified element.
    pub fn namespaced(namespace: impl Into<String>, local_name: impl Into<String>) -> Self {
        Self {
            namespace: Some(namespace.into()),
            ..Self::new(local_name)
        }
    }

    /// Add an attribute in no namespace.
    pub fn with_attribute(self, local_name: impl Into<String>, value: impl Into<String>) -> Self {
        self.with(Attribute::new(local_name, value))
    }

    /// Add a pre-built attribute.
    pub fn with(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Add an ID-typed `id` attribute.
    pub fn with_id(self, id: impl Into<String>) -> Self {
        self.with(Attribute::new("id", id).with_kind(AttributeType::Id))
    }

    /// Set the `class` attribute.
    pub fn with_class(self, classes: impl Into<String>) -> Self {
        self.with_attribute("class", classes)
    }

    /// Set `xml:lang`.
    pub fn with_lang(self, language: impl Into<String>) -> Self {
        self.with(Attribute::namespaced(XML_NAMESPACE, "lang", language))
    }

    /// Mark a pseudo-class as applying to this element.
    pub fn with_pseudo_class(mut self, name: impl Into<String>) -> Self {
        self.pseudo_classes.push(name.into());
        self
    }

    /// Find an attribute by qualified name.
    pub fn attribute(&self, namespace: Option<&str>, local_name: &str) -> Option<&Attribute> {
        self.attributes
            .iter()
            .find(|attr| attr.is_named(namespace, local_name))
    }

    /// The language this element declares itself: `xml:lang`, else `lang`.
    pub fn declared_language(&self) -> Option<&str> {
        self.attribute(Some(XML_NAMESPACE), "lang")
            .or_else(|| self.attribute(None, "lang"))
            .map(|attr| attr.value.as_str())
    }

    /// Whether a pseudo-class applies, compared ASCII case-insensitively.
    pub fn has_pseudo_class(&self, name: &str) -> bool {
        self.pseudo_classes
            .iter()
            .any(|pseudo| pseudo.eq_ignore_ascii_case(name))
    }
}
